//! Embedded message store.
//!
//! One sqlite connection per vhost context, touched only from the event
//! loop that owns the context. Timestamps are assigned here at commit time;
//! a client never supplies one.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use rusqlite::{Connection, OptionalExtension, params};

const MAX_USERNAME: usize = 32;
const MAX_EMAIL: usize = 100;
const MAX_IP: usize = 80;

/// A message about to be committed. `time` and `id` are assigned by the
/// store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub username: String,
    pub email: String,
    pub ip: String,
    pub content: Vec<u8>,
}

/// A persisted row read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: i64,
    pub time: i64,
    pub username: String,
    pub email: String,
    pub ip: String,
    pub content: Vec<u8>,
}

pub struct MessageStore {
    conn: Connection,
}

impl MessageStore {
    pub fn open(path: &str) -> anyhow::Result<Self> {
        let conn =
            Connection::open(path).with_context(|| format!("unable to open message db {path}"))?;
        Ok(Self { conn })
    }

    /// Create the message table if it does not exist yet. Safe to call any
    /// number of times.
    pub fn ensure_schema(&self) -> anyhow::Result<()> {
        self.conn
            .execute(
                "create table if not exists msg (\
                 id integer primary key,\
                 time integer,\
                 username varchar(32),\
                 email varchar(100),\
                 ip varchar(80),\
                 content blob)",
                [],
            )
            .context("unable to create msg table")?;
        Ok(())
    }

    /// Insert one message, stamping it with the current server time.
    /// Returns the new row id.
    pub fn insert(&self, msg: &NewMessage) -> anyhow::Result<i64> {
        let time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before unix epoch")?
            .as_secs() as i64;
        self.conn
            .execute(
                "insert into msg (time, username, email, ip, content) \
                 values (?1, ?2, ?3, ?4, ?5)",
                params![
                    time,
                    clip(&msg.username, MAX_USERNAME),
                    clip(&msg.email, MAX_EMAIL),
                    clip(&msg.ip, MAX_IP),
                    msg.content,
                ],
            )
            .context("unable to insert message")?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, id: i64) -> anyhow::Result<Option<StoredMessage>> {
        self.conn
            .query_row(
                "select id, time, username, email, ip, content from msg where id = ?1",
                params![id],
                |row| {
                    Ok(StoredMessage {
                        id: row.get(0)?,
                        time: row.get(1)?,
                        username: row.get(2)?,
                        email: row.get(3)?,
                        ip: row.get(4)?,
                        content: row.get(5)?,
                    })
                },
            )
            .optional()
            .context("unable to read message")
    }

    pub fn count(&self) -> anyhow::Result<i64> {
        self.conn
            .query_row("select count(*) from msg", [], |row| row.get(0))
            .context("unable to count messages")
    }
}

/// Trim to the column width without splitting a utf-8 sequence.
fn clip(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
