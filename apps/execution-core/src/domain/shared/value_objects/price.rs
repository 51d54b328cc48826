//! Price value object.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::shared::DomainError;

/// A price quoted in an instrument's quote currency.
///
/// Prices carry no currency of their own; the instrument supplies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new Price from a Decimal.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if this price is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if this price is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Round half-to-even to the given number of decimal places.
    #[must_use]
    pub fn round_to(&self, precision: u32) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(precision, RoundingStrategy::MidpointNearestEven),
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .map(Self)
            .map_err(|e| DomainError::InvalidValue {
                field: "price".to_string(),
                message: e.to_string(),
            })
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_from_str_keeps_scale() {
        let p: Price = "1.63000".parse().unwrap();
        assert_eq!(p.amount(), dec!(1.63));
        assert_eq!(format!("{p}"), "1.63000");
    }

    #[test]
    fn price_from_str_invalid() {
        assert!("abc".parse::<Price>().is_err());
    }

    #[test]
    fn price_round_to_bankers() {
        assert_eq!(Price::new(dec!(0.800105)).round_to(5), Price::new(dec!(0.80010)));
        assert_eq!(Price::new(dec!(0.800115)).round_to(5), Price::new(dec!(0.80012)));
    }

    #[test]
    fn price_sign() {
        assert!(Price::new(dec!(1)).is_positive());
        assert!(Price::new(dec!(-1)).is_negative());
        assert!(!Price::ZERO.is_positive());
    }

    #[test]
    fn price_ordering() {
        assert!(Price::new(dec!(1.5)) > Price::new(dec!(1.25)));
    }
}
