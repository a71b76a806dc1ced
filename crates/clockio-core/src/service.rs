//! API-facing operations: clock in/out and worked-hours queries.
//!
//! Every operation is scoped to the calling user and fails with
//! [`ServiceError::Unauthorized`] for anonymous callers. Results are plain
//! serializable structs; transport mapping is left to the caller.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::aggregate::{DayHours, daily_hours, sum_hours};
use crate::auth::{AuthorizationError, Caller};
use crate::calendar::{
    CalendarError, current_month_dates, current_week_dates, dates_of_month, week_dates,
};
use crate::clock::Clock;
use crate::event::{ClockInEvent, ClockOutEvent};
use crate::live::open_session;
use crate::resolver::hours_for_day;
use crate::store::EventStore;
use crate::types::UserId;

/// Errors from [`ClockService`] operations.
#[derive(Debug, Error)]
pub enum ServiceError<E: std::error::Error + 'static> {
    /// The caller is not authenticated.
    #[error(transparent)]
    Unauthorized(#[from] AuthorizationError),

    /// A requested calendar period does not exist.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// The event store failed.
    #[error("event store error: {0}")]
    Store(#[source] E),
}

/// Elapsed time since today's last clock-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentClock {
    pub clocked_in_at: DateTime<Utc>,
    pub elapsed_seconds: i64,
}

/// Worked-hours summary relative to the service clock.
///
/// `today` is `None` when today has no completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockedHours {
    pub today: Option<i64>,
    pub current_week: i64,
    pub current_month: i64,
}

/// Per-day breakdown for a month or week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodReport {
    pub days: Vec<DayHours>,
    pub total: i64,
}

/// Clock operations over an [`EventStore`], timed by a [`Clock`].
#[derive(Debug)]
pub struct ClockService<S, C> {
    store: S,
    clock: C,
}

impl<S: EventStore, C: Clock> ClockService<S, C> {
    pub const fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the service, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// The authenticated caller's identity.
    pub fn me(&self, caller: &Caller) -> Result<UserId, ServiceError<S::Error>> {
        Ok(caller.require_user()?.clone())
    }

    /// Records a clock-in for the caller at the current time.
    pub fn clock_in(&mut self, caller: &Caller) -> Result<ClockInEvent, ServiceError<S::Error>> {
        let user = caller.require_user()?;
        let event = self
            .store
            .insert_clock_in(user, self.clock.now())
            .map_err(ServiceError::Store)?;
        tracing::info!(user = %user, id = event.id, at = %event.timestamp, "clocked in");
        Ok(event)
    }

    /// Records a clock-out for the caller at the current time.
    pub fn clock_out(&mut self, caller: &Caller) -> Result<ClockOutEvent, ServiceError<S::Error>> {
        let user = caller.require_user()?;
        let event = self
            .store
            .insert_clock_out(user, self.clock.now())
            .map_err(ServiceError::Store)?;
        tracing::info!(user = %user, id = event.id, at = %event.timestamp, "clocked out");
        Ok(event)
    }

    /// Time since the caller's last clock-in today, if any.
    pub fn current_clock(
        &self,
        caller: &Caller,
    ) -> Result<Option<CurrentClock>, ServiceError<S::Error>> {
        let user = caller.require_user()?;
        let session =
            open_session(&self.store, user, self.clock.now()).map_err(ServiceError::Store)?;
        Ok(session.map(|s| CurrentClock {
            clocked_in_at: s.clock_in.timestamp,
            elapsed_seconds: s.elapsed_seconds,
        }))
    }

    /// Hours worked today, this ISO week and this month.
    pub fn clocked_hours(&self, caller: &Caller) -> Result<ClockedHours, ServiceError<S::Error>> {
        let user = caller.require_user()?;
        let today = self.clock.now().date_naive();

        let today_hours = hours_for_day(&self.store, user, today).map_err(ServiceError::Store)?;
        let current_week = sum_hours(&self.store, user, &current_week_dates(today))
            .map_err(ServiceError::Store)?;
        let current_month = sum_hours(&self.store, user, &current_month_dates(today))
            .map_err(ServiceError::Store)?;

        Ok(ClockedHours {
            today: today_hours,
            current_week,
            current_month,
        })
    }

    /// Per-day hours for `month` of `year`.
    pub fn month_report(
        &self,
        caller: &Caller,
        month: u32,
        year: i32,
    ) -> Result<PeriodReport, ServiceError<S::Error>> {
        let user = caller.require_user()?;
        let dates = dates_of_month(month, year)?;
        self.report(user, &dates)
    }

    /// Per-day hours for ISO week `iso_week` of `year`.
    pub fn week_report(
        &self,
        caller: &Caller,
        year: i32,
        iso_week: u32,
    ) -> Result<PeriodReport, ServiceError<S::Error>> {
        let user = caller.require_user()?;
        let dates = week_dates(year, iso_week)?;
        self.report(user, &dates)
    }

    fn report(
        &self,
        user: &UserId,
        dates: &[NaiveDate],
    ) -> Result<PeriodReport, ServiceError<S::Error>> {
        let days = daily_hours(&self.store, user, dates).map_err(ServiceError::Store)?;
        let total = days.iter().filter_map(|d| d.hours).sum();
        Ok(PeriodReport { days, total })
    }
}
