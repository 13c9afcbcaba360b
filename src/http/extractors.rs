use super::http_error::HttpError;
use crate::auth::TokenKeys;
use crate::principal::Principal;
use actix_web::dev::Payload;
use actix_web::http::{header, StatusCode};
use actix_web::web::Data;
use actix_web::{FromRequest, HttpRequest};
use log::debug;
use std::future::{ready, Ready};

// Handlers that take a `Principal` argument reject unauthenticated requests
impl FromRequest for Principal {
    type Error = HttpError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

/// Resolve the principal from the request's bearer token
fn authenticate(req: &HttpRequest) -> Result<Principal, HttpError> {
    let keys = req
        .app_data::<Data<TokenKeys>>()
        .ok_or_else(|| HttpError::from_status_code(StatusCode::INTERNAL_SERVER_ERROR))?;
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| HttpError::from_status_code(StatusCode::UNAUTHORIZED))?;
    keys.verify(token.trim()).map_err(|err| {
        debug!("Rejected bearer token: {err}");
        HttpError::from_status_code(StatusCode::UNAUTHORIZED)
    })
}
