//! Minimum commission schedule.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::errors::CommissionError;
use crate::domain::shared::{Currency, InstrumentId, Money};

/// Minimum commission per settlement currency, with per-instrument overrides.
///
/// A minimum only applies to commissions in its own currency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinimumCommissions {
    by_currency: HashMap<Currency, Money>,
    by_instrument: HashMap<InstrumentId, Money>,
}

impl MinimumCommissions {
    /// No minimums.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum for every instrument settling in `minimum`'s currency.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMinimum` if the amount is negative.
    pub fn with_currency_minimum(mut self, minimum: Money) -> Result<Self, CommissionError> {
        Self::check(minimum)?;
        self.by_currency.insert(minimum.currency(), minimum);
        Ok(self)
    }

    /// Set the minimum for one instrument, overriding the currency-wide one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMinimum` if the amount is negative.
    pub fn with_instrument_minimum(
        mut self,
        instrument_id: InstrumentId,
        minimum: Money,
    ) -> Result<Self, CommissionError> {
        Self::check(minimum)?;
        self.by_instrument.insert(instrument_id, minimum);
        Ok(self)
    }

    /// Minimum applying to `instrument_id` when settling in `currency`.
    #[must_use]
    pub fn minimum_for(&self, instrument_id: &InstrumentId, currency: Currency) -> Option<Money> {
        self.by_instrument
            .get(instrument_id)
            .filter(|m| m.currency() == currency)
            .or_else(|| self.by_currency.get(&currency))
            .copied()
    }

    /// Returns true if no minimum is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_currency.is_empty() && self.by_instrument.is_empty()
    }

    fn check(minimum: Money) -> Result<(), CommissionError> {
        if minimum.amount() < Decimal::ZERO {
            return Err(CommissionError::InvalidMinimum {
                amount: minimum.amount(),
            });
        }
        Ok(())
    }
}
