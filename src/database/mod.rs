mod db;
mod models;

pub use self::db::Database;
use crate::sync_ext::MutexExt;
use std::sync::{Arc, Mutex, MutexGuard};

/// The database connection shared between HTTP workers
#[derive(Clone)]
pub struct DatabaseLock(Arc<Mutex<Database>>);

impl DatabaseLock {
    pub fn new(db: Database) -> Self {
        Self(Arc::new(Mutex::new(db)))
    }

    /// Acquire exclusive access to the connection
    /// A handler that panicked while holding the lock does not poison it for later requests.
    pub fn lock(&self) -> MutexGuard<'_, Database> {
        self.0.lock_unpoisoned()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::Database;

    /// Open an in-memory database seeded with the users alice, bob, and carol
    pub fn open_db() -> Database {
        let mut db = Database::connect(":memory:").unwrap();
        db.create_user("alice", "Alice", "Liddell", "555-0100").unwrap();
        db.create_user("bob", "Bob", "Dylan", "555-0101").unwrap();
        db.create_user("carol", "Carol", "King", "555-0102").unwrap();
        db
    }
}
