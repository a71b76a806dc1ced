//! Core domain logic for clockio.
//!
//! This crate contains the fundamental types and logic for:
//! - Calendar windows: day bounds, month dates, ISO week dates
//! - Worked hours: per-day resolution and period aggregation
//! - Live session reporting: elapsed time since today's clock-in
//! - The [`ClockService`] facade consumed by the API layer

pub mod aggregate;
pub mod auth;
pub mod calendar;
pub mod clock;
pub mod event;
pub mod live;
pub mod resolver;
pub mod service;
pub mod store;
pub mod types;

pub use aggregate::{DayHours, daily_hours, sum_hours};
pub use auth::{AuthorizationError, Caller};
pub use calendar::{CalendarError, dates_of_month, day_bounds, week_dates};
pub use clock::{Clock, FixedClock, SystemClock};
pub use event::{ClockInEvent, ClockOutEvent};
pub use live::current_open_duration;
pub use resolver::hours_for_day;
pub use service::{ClockService, ClockedHours, CurrentClock, PeriodReport, ServiceError};
pub use store::{EventStore, MemoryStore};
pub use types::{UserId, ValidationError};
