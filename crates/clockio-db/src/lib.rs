//! Storage layer for clockio.
//!
//! Provides persistence for clock-in and clock-out events using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization (e.g. a `Mutex<Database>`).
//!
//! # Schema
//!
//! Two append-only tables, `clock_ins` and `clock_outs`, each holding
//! `(id, user_id, timestamp)`. Both are indexed on `(user_id, timestamp)`
//! so day-window lookups stay cheap.
//!
//! ## Timestamp Format
//!
//! Timestamps are stored as TEXT in RFC 3339 format with millisecond precision
//! and a `Z` suffix (e.g., `2024-01-15T10:30:00.000Z`). This ensures:
//! - Lexicographic ordering matches chronological ordering
//! - Human-readable values in the database
//! - Timezone-aware (always UTC)
//!
//! Sub-millisecond precision is truncated on insert.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use clockio_core::{ClockInEvent, ClockOutEvent, EventStore, UserId, ValidationError};
use rusqlite::{Connection, params};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to parse a stored timestamp.
    #[error("invalid timestamp in {table} row {id}: {timestamp}")]
    TimestampParse {
        table: &'static str,
        id: i64,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored row carries an invalid user ID.
    #[error("invalid user ID in {table} row {id}")]
    InvalidUserId {
        table: &'static str,
        id: i64,
        #[source]
        source: ValidationError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// Total stored events per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub clock_ins: i64,
    pub clock_outs: i64,
}

/// Latest clock event timestamp for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLastEvent {
    pub user_id: String,
    pub last_event: String,
}

/// Which event table a query targets.
#[derive(Debug, Clone, Copy)]
enum Table {
    ClockIns,
    ClockOuts,
}

impl Table {
    const fn name(self) -> &'static str {
        match self {
            Self::ClockIns => "clock_ins",
            Self::ClockOuts => "clock_outs",
        }
    }
}

/// A decoded row shared by both event tables.
struct EventRow {
    id: i64,
    user_id: UserId,
    timestamp: DateTime<Utc>,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- timestamp: RFC 3339 with milliseconds (e.g., '2024-01-15T10:30:00.000Z')
            CREATE TABLE IF NOT EXISTS clock_ins (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_clock_ins_user_timestamp
                ON clock_ins(user_id, timestamp);

            CREATE TABLE IF NOT EXISTS clock_outs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_clock_outs_user_timestamp
                ON clock_outs(user_id, timestamp);
            ",
        )?;
        Ok(())
    }

    /// Counts stored clock-ins and clock-outs across all users.
    pub fn event_counts(&self) -> Result<EventCounts, DbError> {
        let clock_ins = self
            .conn
            .query_row("SELECT COUNT(*) FROM clock_ins", [], |row| row.get(0))?;
        let clock_outs = self
            .conn
            .query_row("SELECT COUNT(*) FROM clock_outs", [], |row| row.get(0))?;
        Ok(EventCounts {
            clock_ins,
            clock_outs,
        })
    }

    /// Lists the last clock event per user, ordered by most recent.
    pub fn last_event_times_by_user(&self) -> Result<Vec<UserLastEvent>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT user_id, MAX(timestamp) AS last_event
            FROM (
                SELECT user_id, timestamp FROM clock_ins
                UNION ALL
                SELECT user_id, timestamp FROM clock_outs
            )
            GROUP BY user_id
            ORDER BY last_event DESC, user_id ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(UserLastEvent {
                user_id: row.get(0)?,
                last_event: row.get(1)?,
            })
        })?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    fn insert(&self, table: Table, user: &UserId, at: DateTime<Utc>) -> Result<EventRow, DbError> {
        let at = at.trunc_subsecs(3);
        let sql = format!(
            "INSERT INTO {} (user_id, timestamp) VALUES (?, ?)",
            table.name()
        );
        self.conn
            .execute(&sql, params![user.as_str(), format_timestamp(at)])?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(table = table.name(), id, user = %user, "inserted clock event");
        Ok(EventRow {
            id,
            user_id: user.clone(),
            timestamp: at,
        })
    }

    /// Rows for `user` with `start <= timestamp < end`, ordered by timestamp then ID.
    fn query_range(
        &self,
        table: Table,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<EventRow>, DbError> {
        if end <= start {
            return Ok(Vec::new());
        }
        let sql = format!(
            "
            SELECT id, user_id, timestamp
            FROM {}
            WHERE user_id = ? AND timestamp >= ? AND timestamp < ?
            ORDER BY timestamp ASC, id ASC
            ",
            table.name()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![user.as_str(), format_timestamp(start), format_timestamp(end)],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )?;
        let mut events = Vec::new();
        for row in rows {
            let (id, user_id, timestamp) = row?;
            events.push(decode_row(table, id, user_id, &timestamp)?);
        }
        Ok(events)
    }
}

impl EventStore for Database {
    type Error = DbError;

    fn insert_clock_in(
        &mut self,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> Result<ClockInEvent, Self::Error> {
        let row = self.insert(Table::ClockIns, user, at)?;
        Ok(ClockInEvent {
            id: row.id,
            user_id: row.user_id,
            timestamp: row.timestamp,
        })
    }

    fn insert_clock_out(
        &mut self,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> Result<ClockOutEvent, Self::Error> {
        let row = self.insert(Table::ClockOuts, user, at)?;
        Ok(ClockOutEvent {
            id: row.id,
            user_id: row.user_id,
            timestamp: row.timestamp,
        })
    }

    fn query_clock_ins(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClockInEvent>, Self::Error> {
        let rows = self.query_range(Table::ClockIns, user, start, end)?;
        Ok(rows
            .into_iter()
            .map(|row| ClockInEvent {
                id: row.id,
                user_id: row.user_id,
                timestamp: row.timestamp,
            })
            .collect())
    }

    fn query_clock_outs(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClockOutEvent>, Self::Error> {
        let rows = self.query_range(Table::ClockOuts, user, start, end)?;
        Ok(rows
            .into_iter()
            .map(|row| ClockOutEvent {
                id: row.id,
                user_id: row.user_id,
                timestamp: row.timestamp,
            })
            .collect())
    }
}

fn decode_row(table: Table, id: i64, user_id: String, timestamp: &str) -> Result<EventRow, DbError> {
    let user_id = UserId::new(user_id).map_err(|source| DbError::InvalidUserId {
        table: table.name(),
        id,
        source,
    })?;
    let timestamp = parse_timestamp(table, id, timestamp)?;
    Ok(EventRow {
        id,
        user_id,
        timestamp,
    })
}

fn parse_timestamp(table: Table, id: i64, timestamp: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| DbError::TimestampParse {
            table: table.name(),
            id,
            timestamp: timestamp.to_string(),
            source,
        })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
