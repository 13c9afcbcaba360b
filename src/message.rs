use chrono::{DateTime, Utc};
use serde::Serialize;

pub type MessageId = i32;

/// The public profile of a message's sender or recipient
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// A message with both participants resolved, as returned by `GET /messages/{id}`
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MessageDetail {
    pub id: MessageId,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub from_user: UserSummary,
    pub to_user: UserSummary,
}

/// A newly-sent message, as returned by `POST /messages`
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CreatedMessage {
    pub id: MessageId,
    pub from_username: String,
    pub to_username: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ReadReceipt {
    pub id: MessageId,
    pub read_at: DateTime<Utc>,
}

// Every response wraps its payload in a top-level "message" key
#[derive(Debug, Serialize)]
pub struct MessageEnvelope<T> {
    pub message: T,
}

impl<T: Serialize> MessageEnvelope<T> {
    pub fn new(message: T) -> Self {
        Self { message }
    }
}
