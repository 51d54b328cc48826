//! Order Domain Events
//!
//! External lifecycle events applied to an order by the state machine.

use serde::{Deserialize, Serialize};

use super::value_objects::Fill;
use crate::domain::shared::VenueOrderId;

/// A lifecycle event reported for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    /// Order was sent to the venue.
    Submitted,
    /// Venue acknowledged the order.
    Accepted {
        /// Venue-assigned identifier.
        venue_order_id: VenueOrderId,
    },
    /// Venue refused the order.
    Rejected {
        /// Venue-supplied reason.
        reason: String,
    },
    /// Order was canceled.
    Canceled,
    /// Order expired.
    Expired,
    /// An execution against the order.
    Filled(Fill),
}

impl OrderEvent {
    /// Event name for logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Accepted { .. } => "ACCEPTED",
            Self::Rejected { .. } => "REJECTED",
            Self::Canceled => "CANCELED",
            Self::Expired => "EXPIRED",
            Self::Filled(_) => "FILLED",
        }
    }
}
