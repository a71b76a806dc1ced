//! Event store port and an in-memory implementation.
//!
//! The store is append-only from the core's point of view. Range queries are
//! half-open (`start <= timestamp < end`) and ordered ascending by timestamp,
//! then by insertion order.

use std::convert::Infallible;

use chrono::{DateTime, Utc};

use crate::event::{ClockInEvent, ClockOutEvent};
use crate::types::UserId;

/// Persistence for clock-in and clock-out events.
pub trait EventStore {
    /// Error raised by the backing storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Appends a clock-in for `user` at `at`.
    fn insert_clock_in(
        &mut self,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> Result<ClockInEvent, Self::Error>;

    /// Appends a clock-out for `user` at `at`.
    fn insert_clock_out(
        &mut self,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> Result<ClockOutEvent, Self::Error>;

    /// Clock-ins for `user` within `[start, end)`, ascending.
    fn query_clock_ins(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClockInEvent>, Self::Error>;

    /// Clock-outs for `user` within `[start, end)`, ascending.
    fn query_clock_outs(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClockOutEvent>, Self::Error>;

    /// The latest clock-in within `[start, end)`.
    fn last_clock_in(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<ClockInEvent>, Self::Error> {
        Ok(self.query_clock_ins(user, start, end)?.pop())
    }

    /// The latest clock-out within `[start, end)`.
    fn last_clock_out(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<ClockOutEvent>, Self::Error> {
        Ok(self.query_clock_outs(user, start, end)?.pop())
    }
}

impl<S: EventStore + ?Sized> EventStore for &mut S {
    type Error = S::Error;

    fn insert_clock_in(
        &mut self,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> Result<ClockInEvent, Self::Error> {
        (**self).insert_clock_in(user, at)
    }

    fn insert_clock_out(
        &mut self,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> Result<ClockOutEvent, Self::Error> {
        (**self).insert_clock_out(user, at)
    }

    fn query_clock_ins(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClockInEvent>, Self::Error> {
        (**self).query_clock_ins(user, start, end)
    }

    fn query_clock_outs(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClockOutEvent>, Self::Error> {
        (**self).query_clock_outs(user, start, end)
    }
}

/// An [`EventStore`] kept entirely in memory.
///
/// Useful for tests and for embedding the engine without a database.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    clock_ins: Vec<ClockInEvent>,
    clock_outs: Vec<ClockOutEvent>,
    next_id: i64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored clock-ins in insertion order.
    pub fn clock_ins(&self) -> &[ClockInEvent] {
        &self.clock_ins
    }

    /// All stored clock-outs in insertion order.
    pub fn clock_outs(&self) -> &[ClockOutEvent] {
        &self.clock_outs
    }

    const fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

fn in_window(timestamp: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    timestamp >= start && timestamp < end
}

impl EventStore for MemoryStore {
    type Error = Infallible;

    fn insert_clock_in(
        &mut self,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> Result<ClockInEvent, Self::Error> {
        let event = ClockInEvent {
            id: self.next_id(),
            user_id: user.clone(),
            timestamp: at,
        };
        self.clock_ins.push(event.clone());
        Ok(event)
    }

    fn insert_clock_out(
        &mut self,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> Result<ClockOutEvent, Self::Error> {
        let event = ClockOutEvent {
            id: self.next_id(),
            user_id: user.clone(),
            timestamp: at,
        };
        self.clock_outs.push(event.clone());
        Ok(event)
    }

    fn query_clock_ins(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClockInEvent>, Self::Error> {
        let mut events: Vec<_> = self
            .clock_ins
            .iter()
            .filter(|e| &e.user_id == user && in_window(e.timestamp, start, end))
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.timestamp, e.id));
        Ok(events)
    }

    fn query_clock_outs(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClockOutEvent>, Self::Error> {
        let mut events: Vec<_> = self
            .clock_outs
            .iter()
            .filter(|e| &e.user_id == user && in_window(e.timestamp, start, end))
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.timestamp, e.id));
        Ok(events)
    }
}
