//! Single-rate commission model.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{CommissionError, CommissionModel, MinimumCommissions, check_rate};
use crate::domain::shared::LiquiditySide;

/// Charges the same rate regardless of liquidity side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericCommissionModel {
    rate: Decimal,
    minimums: MinimumCommissions,
}

impl GenericCommissionModel {
    /// Default rate: 0.2 basis points.
    pub const DEFAULT_RATE: Decimal = dec!(0.00002);

    /// Create a model charging `rate` of the notional.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRate` if the rate is negative.
    pub fn new(rate: Decimal) -> Result<Self, CommissionError> {
        Ok(Self {
            rate: check_rate("rate", rate)?,
            minimums: MinimumCommissions::new(),
        })
    }

    /// Attach a minimum schedule.
    #[must_use]
    pub fn with_minimums(mut self, minimums: MinimumCommissions) -> Self {
        self.minimums = minimums;
        self
    }
}

impl Default for GenericCommissionModel {
    fn default() -> Self {
        Self {
            rate: Self::DEFAULT_RATE,
            minimums: MinimumCommissions::new(),
        }
    }
}

impl CommissionModel for GenericCommissionModel {
    fn rate(&self, _liquidity_side: LiquiditySide) -> Decimal {
        self.rate
    }

    fn minimums(&self) -> &MinimumCommissions {
        &self.minimums
    }
}
