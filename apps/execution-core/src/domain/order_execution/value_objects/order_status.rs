//! Order status in the lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an order is in its lifecycle.
///
/// `Filled`, `Canceled`, `Rejected` and `Expired` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created locally, not yet sent.
    Initialized,
    /// Sent to the venue, awaiting acknowledgment.
    Submitted,
    /// Acknowledged and working at the venue.
    Accepted,
    /// Refused by the venue.
    Rejected,
    /// Canceled before completing.
    Canceled,
    /// Expired before completing.
    Expired,
    /// Some but not all of the quantity has been filled.
    PartiallyFilled,
    /// The full quantity has been filled.
    Filled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 8] = [
        Self::Initialized,
        Self::Submitted,
        Self::Accepted,
        Self::Rejected,
        Self::Canceled,
        Self::Expired,
        Self::PartiallyFilled,
        Self::Filled,
    ];

    /// Returns true if the order is in a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Filled | Self::Canceled | Self::Rejected | Self::Expired
        )
    }

    /// Returns true if the order is still live at the venue or locally.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if the order can receive fills.
    #[must_use]
    pub const fn can_fill(&self) -> bool {
        matches!(self, Self::Accepted | Self::PartiallyFilled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized => write!(f, "INITIALIZED"),
            Self::Submitted => write!(f, "SUBMITTED"),
            Self::Accepted => write!(f, "ACCEPTED"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::Canceled => write!(f, "CANCELED"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::PartiallyFilled => write!(f, "PARTIALLY_FILLED"),
            Self::Filled => write!(f, "FILLED"),
        }
    }
}
