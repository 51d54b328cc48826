//! Maker/taker commission model.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{CommissionError, CommissionModel, MinimumCommissions, check_rate};
use crate::domain::shared::LiquiditySide;

/// Charges different rates for providing and removing liquidity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakerTakerCommissionModel {
    maker_rate: Decimal,
    taker_rate: Decimal,
    minimums: MinimumCommissions,
}

impl MakerTakerCommissionModel {
    /// Default maker rate: 2.5 basis points.
    pub const DEFAULT_MAKER_RATE: Decimal = dec!(0.00025);
    /// Default taker rate: 7.5 basis points.
    pub const DEFAULT_TAKER_RATE: Decimal = dec!(0.00075);

    /// Create a model with explicit maker and taker rates.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRate` if either rate is negative.
    pub fn new(maker_rate: Decimal, taker_rate: Decimal) -> Result<Self, CommissionError> {
        Ok(Self {
            maker_rate: check_rate("maker_rate", maker_rate)?,
            taker_rate: check_rate("taker_rate", taker_rate)?,
            minimums: MinimumCommissions::new(),
        })
    }

    /// Attach a minimum schedule.
    #[must_use]
    pub fn with_minimums(mut self, minimums: MinimumCommissions) -> Self {
        self.minimums = minimums;
        self
    }

    /// Get the maker rate.
    #[must_use]
    pub const fn maker_rate(&self) -> Decimal {
        self.maker_rate
    }

    /// Get the taker rate.
    #[must_use]
    pub const fn taker_rate(&self) -> Decimal {
        self.taker_rate
    }
}

impl Default for MakerTakerCommissionModel {
    fn default() -> Self {
        Self {
            maker_rate: Self::DEFAULT_MAKER_RATE,
            taker_rate: Self::DEFAULT_TAKER_RATE,
            minimums: MinimumCommissions::new(),
        }
    }
}

impl CommissionModel for MakerTakerCommissionModel {
    fn rate(&self, liquidity_side: LiquiditySide) -> Decimal {
        match liquidity_side {
            LiquiditySide::Maker => self.maker_rate,
            LiquiditySide::Taker => self.taker_rate,
        }
    }

    fn minimums(&self) -> &MinimumCommissions {
        &self.minimums
    }
}
