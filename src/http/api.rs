use serde::Deserialize;

/// The body of `POST /messages`
/// The sender is always the authenticated principal, so it isn't part of the payload.
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub to_username: String,
    pub body: String,
}
