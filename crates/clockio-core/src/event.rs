//! Clock-in and clock-out events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A user started working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockInEvent {
    /// Store-assigned identifier, ascending in insertion order.
    pub id: i64,
    /// The user who clocked in.
    pub user_id: UserId,
    /// When the clock-in was recorded.
    pub timestamp: DateTime<Utc>,
}

/// A user stopped working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockOutEvent {
    /// Store-assigned identifier, ascending in insertion order.
    pub id: i64,
    /// The user who clocked out.
    pub user_id: UserId,
    /// When the clock-out was recorded.
    pub timestamp: DateTime<Utc>,
}
