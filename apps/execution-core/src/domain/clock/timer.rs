//! Timer specifications and the events they produce.

use std::fmt;
use std::sync::Arc;

use chrono::TimeDelta;

use super::errors::ClockError;
use crate::domain::shared::Timestamp;

/// Callback invoked when a timer fires.
pub type TimerCallback = Arc<dyn Fn(TimeEvent) + Send + Sync>;

/// When a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSchedule {
    /// Fire exactly once at `at`.
    Once {
        /// Due time.
        at: Timestamp,
    },
    /// Fire every `interval`, first at `start + interval`.
    Repeating {
        /// Time between firings. Must be positive.
        interval: TimeDelta,
        /// Anchor of the series; the clock's current time when `None`.
        start: Option<Timestamp>,
        /// Last time the series may fire (inclusive).
        stop: Option<Timestamp>,
    },
}

/// A named timer registration.
#[derive(Clone)]
pub struct TimerSpec {
    name: String,
    schedule: TimerSchedule,
    callback: TimerCallback,
}

impl TimerSpec {
    /// A one-shot timer due at `at`.
    pub fn once(
        name: impl Into<String>,
        at: Timestamp,
        callback: impl Fn(TimeEvent) + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            schedule: TimerSchedule::Once { at },
            callback: Arc::new(callback),
        }
    }

    /// A periodic timer anchored at the clock's current time.
    pub fn repeating(
        name: impl Into<String>,
        interval: TimeDelta,
        callback: impl Fn(TimeEvent) + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            schedule: TimerSchedule::Repeating {
                interval,
                start: None,
                stop: None,
            },
            callback: Arc::new(callback),
        }
    }

    /// Anchor a periodic series at `start`. No effect on one-shot timers.
    #[must_use]
    pub fn starting_at(mut self, start: Timestamp) -> Self {
        if let TimerSchedule::Repeating { interval, stop, .. } = self.schedule {
            self.schedule = TimerSchedule::Repeating {
                interval,
                start: Some(start),
                stop,
            };
        }
        self
    }

    /// End a periodic series at `stop` (inclusive). No effect on one-shot timers.
    #[must_use]
    pub fn stopping_at(mut self, stop: Timestamp) -> Self {
        if let TimerSchedule::Repeating {
            interval, start, ..
        } = self.schedule
        {
            self.schedule = TimerSchedule::Repeating {
                interval,
                start,
                stop: Some(stop),
            };
        }
        self
    }

    /// Get the timer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the schedule.
    #[must_use]
    pub const fn schedule(&self) -> TimerSchedule {
        self.schedule
    }

    /// Get the callback.
    #[must_use]
    pub const fn callback(&self) -> &TimerCallback {
        &self.callback
    }

    /// Resolve the schedule against the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty, the interval is not positive, or a
    /// stop time precedes the first due time.
    pub fn resolve(self, now: Timestamp) -> Result<ScheduledTimer, ClockError> {
        if self.name.is_empty() {
            return Err(ClockError::EmptyTimerName);
        }
        let (first_due, interval, stop) = match self.schedule {
            TimerSchedule::Once { at } => (at, None, None),
            TimerSchedule::Repeating {
                interval,
                start,
                stop,
            } => {
                if interval <= TimeDelta::zero() {
                    return Err(ClockError::InvalidInterval {
                        name: self.name,
                        reason: format!("interval must be positive, was {interval}"),
                    });
                }
                let start = start.unwrap_or(now);
                let first = start
                    .checked_add(interval)
                    .ok_or_else(|| ClockError::InvalidInterval {
                        name: self.name.clone(),
                        reason: "first due time is out of range".to_string(),
                    })?;
                if stop.is_some_and(|s| s < first) {
                    return Err(ClockError::InvalidInterval {
                        name: self.name,
                        reason: format!("stop time precedes first due time {first}"),
                    });
                }
                (first, Some(interval), stop)
            }
        };
        Ok(ScheduledTimer {
            name: self.name,
            first_due,
            interval,
            stop,
            callback: self.callback,
        })
    }
}

impl fmt::Debug for TimerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerSpec")
            .field("name", &self.name)
            .field("schedule", &self.schedule)
            .finish_non_exhaustive()
    }
}

/// A validated timer with concrete due times.
#[derive(Clone)]
pub struct ScheduledTimer {
    name: String,
    first_due: Timestamp,
    interval: Option<TimeDelta>,
    stop: Option<Timestamp>,
    callback: TimerCallback,
}

impl ScheduledTimer {
    /// Get the timer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First due time.
    #[must_use]
    pub const fn first_due(&self) -> Timestamp {
        self.first_due
    }

    /// Returns true for periodic timers.
    #[must_use]
    pub const fn is_repeating(&self) -> bool {
        self.interval.is_some()
    }

    /// Due time following `due`, or `None` when the series is over.
    #[must_use]
    pub fn next_after(&self, due: Timestamp) -> Option<Timestamp> {
        let next = due.checked_add(self.interval?)?;
        match self.stop {
            Some(stop) if next > stop => None,
            _ => Some(next),
        }
    }

    /// Get the callback.
    #[must_use]
    pub const fn callback(&self) -> &TimerCallback {
        &self.callback
    }
}

impl fmt::Debug for ScheduledTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTimer")
            .field("name", &self.name)
            .field("first_due", &self.first_due)
            .field("interval", &self.interval)
            .field("stop", &self.stop)
            .finish_non_exhaustive()
    }
}

/// Delivered to a timer callback when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEvent {
    /// Timer name.
    pub name: String,
    /// The due time this firing was scheduled for.
    pub scheduled_at: Timestamp,
    /// Clock time at which the callback ran.
    pub fired_at: Timestamp,
}
