//! Clock errors.

use thiserror::Error;

use crate::domain::shared::Timestamp;

/// Errors raised by clock operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    /// A timer with this name is already active.
    #[error("Timer '{name}' is already active")]
    DuplicateTimerName {
        /// Timer name.
        name: String,
    },

    /// Timer names must be non-empty.
    #[error("Timer name must not be empty")]
    EmptyTimerName,

    /// A repeating timer was given an interval or stop time that can never fire.
    #[error("Invalid interval for timer '{name}': {reason}")]
    InvalidInterval {
        /// Timer name.
        name: String,
        /// Why the schedule was rejected.
        reason: String,
    },

    /// A simulated clock was asked to move backwards.
    #[error("Cannot move clock backwards from {now} to {requested}")]
    NonMonotonic {
        /// Current clock time.
        now: Timestamp,
        /// Requested time.
        requested: Timestamp,
    },
}
