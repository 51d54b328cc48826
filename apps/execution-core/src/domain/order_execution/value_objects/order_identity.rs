//! Client order identity: the (trader, strategy, day, sequence) tuple.
//!
//! Rendered as `O-{trader}.{strategy}-{YYYYMMDD}-{sequence:06}`. Scopes may
//! only contain ASCII alphanumerics, `-` and `_`, so the `.` always separates
//! trader from strategy and the last two `-` fields are the date and sequence.
//! Rendering is therefore injective and [`OrderIdentity::parse`] inverts it.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::shared::{ClientOrderId, StrategyId, TraderId};

const PREFIX: &str = "O-";
const DATE_FORMAT: &str = "%Y%m%d";

/// Errors raised while validating scopes or parsing rendered identities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// A trader or strategy id contains characters the rendering cannot carry.
    #[error("Invalid {kind} '{value}': use ASCII letters, digits, '-' or '_'")]
    InvalidScope {
        /// Which scope (`trader_id` or `strategy_id`).
        kind: &'static str,
        /// Offending value.
        value: String,
    },

    /// A string is not a rendered client order id.
    #[error("Malformed client order id '{value}': {reason}")]
    Malformed {
        /// Offending value.
        value: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A day bucket has issued every sequence number it can hold.
    #[error("Sequence exhausted for {trader_id}.{strategy_id} on {day}")]
    SequenceExhausted {
        /// Trader scope.
        trader_id: TraderId,
        /// Strategy scope.
        strategy_id: StrategyId,
        /// Day bucket.
        day: NaiveDate,
    },
}

/// Check that a scope can be embedded in a rendered identity.
///
/// # Errors
///
/// Returns `InvalidScope` for an empty value or one with other characters.
pub fn validate_scope(kind: &'static str, value: &str) -> Result<(), IdentityError> {
    let valid = !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(IdentityError::InvalidScope {
            kind,
            value: value.to_string(),
        })
    }
}

/// Identity of a client order.
///
/// Deserialization goes through [`OrderIdentity::new`], so stored identities
/// obey the same scope and sequence rules as freshly issued ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IdentityFields")]
pub struct OrderIdentity {
    trader_id: TraderId,
    strategy_id: StrategyId,
    day: NaiveDate,
    sequence: u64,
}

#[derive(Deserialize)]
struct IdentityFields {
    trader_id: TraderId,
    strategy_id: StrategyId,
    day: NaiveDate,
    sequence: u64,
}

impl TryFrom<IdentityFields> for OrderIdentity {
    type Error = IdentityError;

    fn try_from(fields: IdentityFields) -> Result<Self, Self::Error> {
        Self::new(fields.trader_id, fields.strategy_id, fields.day, fields.sequence)
    }
}

impl OrderIdentity {
    /// Build an identity.
    ///
    /// # Errors
    ///
    /// Returns error if either scope is invalid or the sequence is zero.
    pub fn new(
        trader_id: TraderId,
        strategy_id: StrategyId,
        day: NaiveDate,
        sequence: u64,
    ) -> Result<Self, IdentityError> {
        validate_scope("trader_id", trader_id.as_str())?;
        validate_scope("strategy_id", strategy_id.as_str())?;
        if sequence == 0 {
            return Err(IdentityError::Malformed {
                value: format!("{trader_id}.{strategy_id}"),
                reason: "sequence numbers start at 1".to_string(),
            });
        }
        Ok(Self {
            trader_id,
            strategy_id,
            day,
            sequence,
        })
    }

    /// Parse a rendered client order id.
    ///
    /// # Errors
    ///
    /// Returns `Malformed` if the string is not in canonical rendered form.
    pub fn parse(value: &str) -> Result<Self, IdentityError> {
        let malformed = |reason: &str| IdentityError::Malformed {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let body = value
            .strip_prefix(PREFIX)
            .ok_or_else(|| malformed("missing 'O-' prefix"))?;
        let mut fields = body.rsplitn(3, '-');
        let (Some(sequence), Some(day), Some(scopes)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed("expected scopes, date and sequence"));
        };
        let (trader, strategy) = scopes
            .split_once('.')
            .ok_or_else(|| malformed("missing '.' between trader and strategy"))?;
        let day = NaiveDate::parse_from_str(day, DATE_FORMAT)
            .map_err(|e| malformed(&format!("bad date: {e}")))?;
        let sequence = sequence
            .parse::<u64>()
            .map_err(|e| malformed(&format!("bad sequence: {e}")))?;

        let identity = Self::new(
            TraderId::new(trader),
            StrategyId::new(strategy),
            day,
            sequence,
        )
        .map_err(|e| malformed(&e.to_string()))?;

        if identity.to_string() != value {
            return Err(malformed("not in canonical form"));
        }
        Ok(identity)
    }

    /// Get the trader ID.
    #[must_use]
    pub const fn trader_id(&self) -> &TraderId {
        &self.trader_id
    }

    /// Get the strategy ID.
    #[must_use]
    pub const fn strategy_id(&self) -> &StrategyId {
        &self.strategy_id
    }

    /// Get the UTC day bucket.
    #[must_use]
    pub const fn day(&self) -> NaiveDate {
        self.day
    }

    /// Get the sequence number within the day bucket.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Render as a client order id.
    #[must_use]
    pub fn client_order_id(&self) -> ClientOrderId {
        ClientOrderId::new(self.to_string())
    }
}

impl fmt::Display for OrderIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PREFIX}{}.{}-{}-{:06}",
            self.trader_id,
            self.strategy_id,
            self.day.format(DATE_FORMAT),
            self.sequence
        )
    }
}
