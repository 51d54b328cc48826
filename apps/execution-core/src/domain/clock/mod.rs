//! Clock Bounded Context
//!
//! A swappable source of "now" with named one-shot and periodic timers.
//! Wall-clock and simulated implementations live in the infrastructure layer;
//! everything above them depends only on [`Clock`].

pub mod errors;
pub mod timer;

use chrono::NaiveDate;

use crate::domain::shared::Timestamp;

pub use errors::ClockError;
pub use timer::{ScheduledTimer, TimeEvent, TimerCallback, TimerSchedule, TimerSpec};

/// Source of the current time and owner of named timers.
///
/// Timer names are unique among active timers. A one-shot timer stops being
/// active once it fires; a periodic timer stays active until canceled or its
/// stop time passes.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> Timestamp;

    /// Register a timer.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTimerName` if a timer with the same name is active,
    /// or `InvalidInterval` / `EmptyTimerName` for a malformed spec.
    fn set_timer(&self, spec: TimerSpec) -> Result<(), ClockError>;

    /// Cancel a timer. No-op if no timer with that name is active.
    fn cancel_timer(&self, name: &str);

    /// Cancel every active timer.
    fn cancel_all_timers(&self);

    /// Names of active timers, sorted.
    fn timer_names(&self) -> Vec<String>;

    /// Number of active timers.
    fn timer_count(&self) -> usize {
        self.timer_names().len()
    }

    /// Next due time of an active timer.
    fn next_time(&self, name: &str) -> Option<Timestamp>;

    /// Calendar date of `now()` in UTC.
    fn utc_date(&self) -> NaiveDate {
        self.now().utc_date()
    }
}
