use crate::message::UserSummary;
use crate::schema::{messages, users};
use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable};

#[derive(Clone, Debug, Eq, PartialEq, Queryable)]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub joined_at: NaiveDateTime,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone: &'a str,
    pub joined_at: NaiveDateTime,
}

/*
 * Timestamps are stored as naive UTC. The read_at column stays NULL until the
 * recipient reads the message and is never overwritten after that.
 */
#[derive(Debug, Queryable)]
pub struct MessageRow {
    pub id: i32,
    pub from_username: String,
    pub to_username: String,
    pub body: String,
    pub sent_at: NaiveDateTime,
    pub read_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessageRow<'a> {
    pub from_username: &'a str,
    pub to_username: &'a str,
    pub body: &'a str,
    pub sent_at: NaiveDateTime,
}
