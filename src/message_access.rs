use crate::message::{CreatedMessage, MessageDetail, MessageId, ReadReceipt};
use crate::principal::Principal;
use crate::store::{MessageStore, StoreError};
use core::fmt;
use log::{debug, warn};
use std::error::Error;

/// The sender and recipient of a message
#[derive(Clone, Copy, Debug)]
pub struct Participants<'a> {
    pub from: &'a str,
    pub to: &'a str,
}

impl<'a> From<&'a MessageDetail> for Participants<'a> {
    fn from(message: &'a MessageDetail) -> Self {
        Self {
            from: &message.from_user.username,
            to: &message.to_user.username,
        }
    }
}

/// Only the sender and the recipient may read a message
pub fn can_read(participants: Participants, principal: &Principal) -> bool {
    participants.from == principal.username() || participants.to == principal.username()
}

/// Only the recipient may mark a message as read
pub fn can_mark_read(participants: Participants, principal: &Principal) -> bool {
    participants.to == principal.username()
}

#[derive(Debug)]
pub enum AccessError {
    Unauthorized(&'static str),
    Store(StoreError),
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unauthorized(reason) => f.write_str(reason),
            Self::Store(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl Error for AccessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unauthorized(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for AccessError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Load a message that the principal sent or received
pub fn get_message(
    store: &mut impl MessageStore,
    id: MessageId,
    principal: &Principal,
) -> Result<MessageDetail, AccessError> {
    let message = store.get(id)?;
    if !can_read(Participants::from(&message), principal) {
        warn!("{principal} attempted to read message {id}");
        return Err(AccessError::Unauthorized(
            "You don't have permission to read this message",
        ));
    }
    Ok(message)
}

/// Send a message from the principal to another user
pub fn create_message(
    store: &mut impl MessageStore,
    principal: &Principal,
    to_username: &str,
    body: &str,
) -> Result<CreatedMessage, AccessError> {
    let message = store.create(principal.username(), to_username, body)?;
    debug!("{principal} sent message {} to {to_username}", message.id);
    Ok(message)
}

/// Mark a message that the principal received as read
pub fn mark_read(
    store: &mut impl MessageStore,
    id: MessageId,
    principal: &Principal,
) -> Result<ReadReceipt, AccessError> {
    let message = store.get(id)?;
    if !can_mark_read(Participants::from(&message), principal) {
        warn!("{principal} attempted to mark message {id} as read");
        return Err(AccessError::Unauthorized(
            "You don't have permission to change this message to read",
        ));
    }
    Ok(store.mark_read(id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::open_db;
    use crate::database::Database;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn alice() -> Principal {
        Principal::new("alice")
    }

    fn bob() -> Principal {
        Principal::new("bob")
    }

    fn carol() -> Principal {
        Principal::new("carol")
    }

    fn send_hello(db: &mut Database) -> MessageId {
        create_message(db, &alice(), "bob", "hello").unwrap().id
    }

    #[test]
    fn test_predicates() {
        let participants = Participants {
            from: "alice",
            to: "bob",
        };
        assert!(can_read(participants, &alice()));
        assert!(can_read(participants, &bob()));
        assert!(!can_read(participants, &carol()));

        assert!(can_mark_read(participants, &bob()));
        assert!(!can_mark_read(participants, &alice()));
        assert!(!can_mark_read(participants, &carol()));
    }

    #[test]
    fn test_predicates_message_to_self() {
        let participants = Participants {
            from: "alice",
            to: "alice",
        };
        assert!(can_read(participants, &alice()));
        assert!(can_mark_read(participants, &alice()));
    }

    #[test]
    fn test_create_message() {
        let mut db = open_db();
        let message = create_message(&mut db, &alice(), "bob", "hi").unwrap();
        assert_eq!(message.from_username, "alice");
        assert_eq!(message.to_username, "bob");
        assert_eq!(message.body, "hi");
        assert!(message.sent_at <= Utc::now());
    }

    #[test]
    fn test_create_message_unknown_recipient() {
        let mut db = open_db();
        assert_matches!(
            create_message(&mut db, &alice(), "dave", "hi"),
            Err(AccessError::Store(StoreError::NotFound(_)))
        );
    }

    #[test]
    fn test_get_message_participants() {
        let mut db = open_db();
        let id = send_hello(&mut db);

        let message = get_message(&mut db, id, &alice()).unwrap();
        assert_eq!(message.body, "hello");
        assert_eq!(message.from_user.username, "alice");
        assert_eq!(message.from_user.first_name, "Alice");
        assert_eq!(message.to_user.username, "bob");
        assert_eq!(message.to_user.last_name, "Dylan");

        assert_eq!(get_message(&mut db, id, &bob()).unwrap(), message);
    }

    #[test]
    fn test_get_message_outsider() {
        let mut db = open_db();
        let id = send_hello(&mut db);

        let err = get_message(&mut db, id, &carol()).unwrap_err();
        assert_matches!(err, AccessError::Unauthorized(_));
        assert_eq!(
            err.to_string(),
            "You don't have permission to read this message"
        );
    }

    #[test]
    fn test_get_message_missing() {
        let mut db = open_db();
        assert_matches!(
            get_message(&mut db, 99, &alice()),
            Err(AccessError::Store(StoreError::NotFound(_)))
        );
    }

    #[test]
    fn test_mark_read_recipient() {
        let mut db = open_db();
        let id = send_hello(&mut db);

        let receipt = mark_read(&mut db, id, &bob()).unwrap();
        assert_eq!(receipt.id, id);
        assert_eq!(
            get_message(&mut db, id, &bob()).unwrap().read_at,
            Some(receipt.read_at)
        );
    }

    #[test]
    fn test_mark_read_non_recipient_leaves_message_unread() {
        let mut db = open_db();
        let id = send_hello(&mut db);

        for principal in [alice(), carol()] {
            let err = mark_read(&mut db, id, &principal).unwrap_err();
            assert_eq!(
                err.to_string(),
                "You don't have permission to change this message to read"
            );
        }
        assert_eq!(get_message(&mut db, id, &bob()).unwrap().read_at, None);
    }

    #[test]
    fn test_mark_read_twice() {
        let mut db = open_db();
        let id = send_hello(&mut db);

        let first = mark_read(&mut db, id, &bob()).unwrap();
        let second = mark_read(&mut db, id, &bob()).unwrap();
        assert_eq!(first.read_at, second.read_at);
    }

    #[test]
    fn test_conversation() {
        let mut db = open_db();
        let created = create_message(&mut db, &alice(), "bob", "hello").unwrap();
        assert_eq!(created.from_username, "alice");
        assert_eq!(created.to_username, "bob");

        let id = created.id;
        assert!(get_message(&mut db, id, &alice()).is_ok());
        assert_matches!(
            get_message(&mut db, id, &carol()),
            Err(AccessError::Unauthorized(_))
        );

        let receipt = mark_read(&mut db, id, &bob()).unwrap();
        assert_matches!(
            mark_read(&mut db, id, &alice()),
            Err(AccessError::Unauthorized(_))
        );
        assert_eq!(
            get_message(&mut db, id, &alice()).unwrap().read_at,
            Some(receipt.read_at)
        );
    }
}
