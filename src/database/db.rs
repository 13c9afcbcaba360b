use super::models::{MessageRow, NewMessageRow, NewUser, User};
use crate::message::{CreatedMessage, MessageDetail, MessageId, ReadReceipt};
use crate::schema::{messages, users};
use crate::store::{MessageStore, StoreError};
use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::path::Path;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub struct Database {
    connection: SqliteConnection,
}

impl Database {
    /// Open the SQLite database at the given path, creating it if necessary
    pub fn open(db_path: &Path) -> Result<Self> {
        Self::connect(&db_path.to_string_lossy())
            .with_context(|| format!("Failed to open SQLite database {}", db_path.display()))
    }

    /// Connect to a SQLite database URL and bring its schema up to date
    pub(crate) fn connect(url: &str) -> Result<Self> {
        let mut connection = SqliteConnection::establish(url)?;

        // SQLite leaves foreign key enforcement off unless each connection opts in
        connection
            .batch_execute("PRAGMA foreign_keys = ON")
            .context("Failed to enable foreign keys")?;
        connection
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| anyhow!("Failed to run SQLite migrations: {err}"))?;

        Ok(Self { connection })
    }

    /// Register a new user
    pub fn create_user(
        &mut self,
        username: &str,
        first_name: &str,
        last_name: &str,
        phone: &str,
    ) -> Result<User, StoreError> {
        let result: QueryResult<User> = diesel::insert_into(users::table)
            .values(NewUser {
                username,
                first_name,
                last_name,
                phone,
                joined_at: Utc::now().naive_utc(),
            })
            .get_result(&mut self.connection);

        match result {
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Err(
                StoreError::Conflict(format!("User {username} already exists")),
            ),
            result => Ok(result?),
        }
    }

    /// Look up a user by their username
    pub fn get_user(&mut self, username: &str) -> Result<User, StoreError> {
        load_user(&mut self.connection, username)
    }
}

impl MessageStore for Database {
    fn get(&mut self, id: MessageId) -> Result<MessageDetail, StoreError> {
        self.connection.transaction(|conn| {
            let row = load_message(conn, id)?;
            let from_user = load_user(conn, &row.from_username)?;
            let to_user = load_user(conn, &row.to_username)?;
            Ok(MessageDetail {
                id: row.id,
                body: row.body,
                sent_at: to_utc(&row.sent_at),
                read_at: row.read_at.as_ref().map(to_utc),
                from_user: from_user.into(),
                to_user: to_user.into(),
            })
        })
    }

    fn create(
        &mut self,
        from_username: &str,
        to_username: &str,
        body: &str,
    ) -> Result<CreatedMessage, StoreError> {
        self.connection.transaction(|conn| {
            // Report a missing participant by name instead of as a raw constraint violation
            load_user(conn, from_username)?;
            load_user(conn, to_username)?;

            let row: MessageRow = diesel::insert_into(messages::table)
                .values(NewMessageRow {
                    from_username,
                    to_username,
                    body,
                    sent_at: Utc::now().naive_utc(),
                })
                .get_result(conn)?;
            Ok(CreatedMessage {
                id: row.id,
                from_username: row.from_username,
                to_username: row.to_username,
                body: row.body,
                sent_at: to_utc(&row.sent_at),
            })
        })
    }

    fn mark_read(&mut self, id: MessageId) -> Result<ReadReceipt, StoreError> {
        self.connection.transaction(|conn| {
            let read_at = match load_message(conn, id)?.read_at {
                Some(read_at) => read_at,
                None => {
                    let now = Utc::now().naive_utc();
                    diesel::update(messages::table.find(id).filter(messages::read_at.is_null()))
                        .set(messages::read_at.eq(Some(now)))
                        .execute(conn)?;
                    now
                }
            };
            Ok(ReadReceipt {
                id,
                read_at: to_utc(&read_at),
            })
        })
    }
}

fn find_user(conn: &mut SqliteConnection, username: &str) -> Result<Option<User>, StoreError> {
    Ok(users::table
        .find(username)
        .first::<User>(conn)
        .optional()?)
}

fn load_user(conn: &mut SqliteConnection, username: &str) -> Result<User, StoreError> {
    find_user(conn, username)?
        .ok_or_else(|| StoreError::NotFound(format!("No such user: {username}")))
}

fn load_message(conn: &mut SqliteConnection, id: MessageId) -> Result<MessageRow, StoreError> {
    messages::table
        .find(id)
        .first::<MessageRow>(conn)
        .optional()?
        .ok_or_else(|| StoreError::NotFound(format!("No such message: {id}")))
}

fn to_utc(timestamp: &NaiveDateTime) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(timestamp)
}
