//! Money value object for currency amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::Currency;
use crate::domain::shared::DomainError;

/// A monetary amount in a specific currency.
///
/// Represented as a Decimal for precise financial calculations. The amount is
/// always rounded half-to-even to the currency's minor-unit precision, so two
/// `Money` values compare equal exactly when they would print the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Create a new Money value, rounding to the currency precision.
    #[must_use]
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount
                .round_dp_with_strategy(currency.precision(), RoundingStrategy::MidpointNearestEven),
            currency,
        }
    }

    /// Zero in the given currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Get the currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if this amount is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true if this amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Returns true if this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Add another amount in the same currency.
    ///
    /// # Errors
    ///
    /// Returns error if the currencies differ.
    pub fn checked_add(&self, other: Self) -> Result<Self, DomainError> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Subtract another amount in the same currency.
    ///
    /// # Errors
    ///
    /// Returns error if the currencies differ.
    pub fn checked_sub(&self, other: Self) -> Result<Self, DomainError> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    fn ensure_same_currency(&self, other: Self) -> Result<(), DomainError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(DomainError::BusinessRuleViolation {
                rule: "SAME_CURRENCY".to_string(),
                message: format!(
                    "cannot combine {} with {}",
                    self.currency, other.currency
                ),
            })
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.precision() as usize;
        write!(f, "{:.dp$} {}", self.amount, self.currency)
    }
}

impl PartialOrd for Money {
    /// Amounts in different currencies are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency == other.currency {
            Some(self.amount.cmp(&other.amount))
        } else {
            None
        }
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.amount
    }
}
