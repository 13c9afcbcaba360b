use crate::message::{CreatedMessage, MessageDetail, MessageId, ReadReceipt};
use core::fmt;
use std::error::Error;

/// Persistence operations that the message routes rely on
pub trait MessageStore {
    /// Load a message along with the profiles of its sender and recipient
    fn get(&mut self, id: MessageId) -> Result<MessageDetail, StoreError>;

    /// Send a new, unread message from one existing user to another
    fn create(
        &mut self,
        from_username: &str,
        to_username: &str,
        body: &str,
    ) -> Result<CreatedMessage, StoreError>;

    /// Record that a message has been read
    /// A message that is already read keeps its original read time.
    fn mark_read(&mut self, id: MessageId) -> Result<ReadReceipt, StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    NotFound(String),
    Conflict(String),
    Database(diesel::result::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotFound(message) | Self::Conflict(message) => f.write_str(message),
            Self::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err)
    }
}
