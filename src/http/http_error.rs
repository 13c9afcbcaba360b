use crate::message_access::AccessError;
use crate::store::StoreError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use core::fmt;
use log::error;
use std::error::Error;

#[derive(Debug)]
pub enum HttpError {
    GenericError(StatusCode),
    WithReason(StatusCode, String),
}

// HttpError wraps a StatusCode and an optional human-readable reason
impl HttpError {
    pub fn from_status_code(status_code: StatusCode) -> Self {
        Self::GenericError(status_code)
    }

    pub fn with_reason(status_code: StatusCode, reason: impl Into<String>) -> Self {
        Self::WithReason(status_code, reason.into())
    }

    fn reason(&self) -> String {
        match self {
            Self::GenericError(status_code) => status_code
                .canonical_reason()
                .unwrap_or("unknown")
                .to_owned(),
            Self::WithReason(_, reason) => reason.clone(),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.status_code().as_str(), self.reason())
    }
}

impl Error for HttpError {}

impl ResponseError for HttpError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.reason())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::GenericError(status_code) | Self::WithReason(status_code, _) => *status_code,
        }
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(reason) => Self::with_reason(StatusCode::NOT_FOUND, reason),
            StoreError::Conflict(reason) => Self::with_reason(StatusCode::CONFLICT, reason),
            StoreError::Database(err) => {
                // Don't leak database details to the client
                error!("Database error: {err}");
                Self::from_status_code(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl From<AccessError> for HttpError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthorized(reason) => Self::with_reason(StatusCode::UNAUTHORIZED, reason),
            AccessError::Store(err) => err.into(),
        }
    }
}
