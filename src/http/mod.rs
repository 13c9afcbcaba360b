mod api;
mod extractors;
mod http_error;

use self::api::CreateMessageRequest;
pub use self::http_error::HttpError;
use crate::auth::TokenKeys;
use crate::database::DatabaseLock;
use crate::message::{MessageEnvelope, MessageId};
use crate::message_access;
use crate::principal::Principal;
use actix_web::middleware::{Compress, Logger};
use actix_web::web::{post as post_route, resource, scope, Data, Json, Path, ServiceConfig};
use actix_web::{get, post, App, HttpServer, Responder};
use log::info;

#[get("/{id}")]
async fn get_message(
    id: Path<MessageId>,
    principal: Principal,
    db: Data<DatabaseLock>,
) -> Result<impl Responder, HttpError> {
    let message = message_access::get_message(&mut *db.lock(), id.into_inner(), &principal)?;
    Ok(Json(MessageEnvelope::new(message)))
}

// Registered in `configure` so that it answers with or without a trailing slash
async fn create_message(
    principal: Principal,
    payload: Json<CreateMessageRequest>,
    db: Data<DatabaseLock>,
) -> Result<impl Responder, HttpError> {
    let CreateMessageRequest { to_username, body } = payload.into_inner();
    let message =
        message_access::create_message(&mut *db.lock(), &principal, &to_username, &body)?;
    Ok(Json(MessageEnvelope::new(message)))
}

#[post("/{id}/read")]
async fn mark_read(
    id: Path<MessageId>,
    principal: Principal,
    db: Data<DatabaseLock>,
) -> Result<impl Responder, HttpError> {
    let receipt = message_access::mark_read(&mut *db.lock(), id.into_inner(), &principal)?;
    Ok(Json(MessageEnvelope::new(receipt)))
}

/// Register the message routes
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/messages")
            .service(resource(["", "/"]).route(post_route().to(create_message)))
            .service(get_message)
            .service(mark_read),
    );
}

pub async fn start_server(
    db: DatabaseLock,
    keys: TokenKeys,
    host: &str,
    port: u16,
) -> Result<(), std::io::Error> {
    info!("Starting HTTP server on {host}:{port}");
    let keys = Data::new(keys);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Compress::default())
            .app_data(Data::new(db.clone()))
            .app_data(keys.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}
