//! Commission Bounded Context
//!
//! Computes the fee charged on a fill from its economic terms.
//!
//! ```text
//! notional   = filled_quantity × filled_price × exchange_rate
//! commission = max(round_half_even(notional × rate), minimum)
//! ```
//!
//! Rounding is to the settlement currency's minor unit. All arithmetic is
//! exact decimal.

pub mod errors;
mod generic;
mod maker_taker;
mod minimums;

use std::fmt;

use rust_decimal::Decimal;

use crate::domain::shared::{Currency, Instrument, LiquiditySide, Money, Price, Quantity};

pub use errors::CommissionError;
pub use generic::GenericCommissionModel;
pub use maker_taker::MakerTakerCommissionModel;
pub use minimums::MinimumCommissions;

/// A pluggable commission schedule.
///
/// Implementors supply the rate for a liquidity side and their minimums; the
/// calculation itself is shared.
pub trait CommissionModel: Send + Sync + fmt::Debug {
    /// Rate applied to the notional for `liquidity_side`.
    fn rate(&self, liquidity_side: LiquiditySide) -> Decimal;

    /// Configured minimum commissions.
    fn minimums(&self) -> &MinimumCommissions;

    /// Commission on a fill, in `currency`.
    ///
    /// `exchange_rate` converts the instrument's quote currency into
    /// `currency`; pass 1 when they are the same.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` for a non-positive quantity, `InvalidPrice`
    /// for a negative price, `InvalidExchangeRate` for a non-positive rate, or
    /// `Overflow` if the notional exceeds the decimal range.
    fn calculate(
        &self,
        instrument: &Instrument,
        filled_quantity: Quantity,
        filled_price: Price,
        exchange_rate: Decimal,
        liquidity_side: LiquiditySide,
        currency: Currency,
    ) -> Result<Money, CommissionError> {
        if !filled_quantity.is_positive() {
            return Err(CommissionError::InvalidQuantity {
                quantity: filled_quantity.amount(),
            });
        }
        if filled_price.is_negative() {
            return Err(CommissionError::InvalidPrice {
                price: filled_price.amount(),
            });
        }
        if exchange_rate <= Decimal::ZERO {
            return Err(CommissionError::InvalidExchangeRate {
                rate: exchange_rate,
            });
        }

        let notional = filled_quantity
            .amount()
            .checked_mul(filled_price.amount())
            .and_then(|value| value.checked_mul(exchange_rate))
            .ok_or(CommissionError::Overflow {
                left: filled_quantity.amount(),
                right: filled_price.amount(),
            })?;
        self.commission_on(instrument, notional, liquidity_side, currency)
    }

    /// Commission on a notional already expressed in the settlement currency.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNotional` for a negative notional, or `Overflow` if the
    /// commission exceeds the decimal range.
    fn calculate_for_notional(
        &self,
        instrument: &Instrument,
        notional: Money,
        liquidity_side: LiquiditySide,
    ) -> Result<Money, CommissionError> {
        if notional.is_negative() {
            return Err(CommissionError::InvalidNotional {
                notional: notional.amount(),
            });
        }
        self.commission_on(
            instrument,
            notional.amount(),
            liquidity_side,
            notional.currency(),
        )
    }

    /// Apply the rate and clamp to the minimum. Inputs are already validated.
    #[doc(hidden)]
    fn commission_on(
        &self,
        instrument: &Instrument,
        notional: Decimal,
        liquidity_side: LiquiditySide,
        currency: Currency,
    ) -> Result<Money, CommissionError> {
        let rate = self.rate(liquidity_side);
        let amount = notional
            .checked_mul(rate)
            .ok_or(CommissionError::Overflow {
                left: notional,
                right: rate,
            })?;
        let commission = Money::new(amount, currency);
        Ok(match self.minimums().minimum_for(instrument.id(), currency) {
            Some(minimum) if minimum.amount() > commission.amount() => minimum,
            _ => commission,
        })
    }
}

/// Check a configured rate.
pub(crate) fn check_rate(name: &'static str, rate: Decimal) -> Result<Decimal, CommissionError> {
    if rate < Decimal::ZERO {
        return Err(CommissionError::InvalidRate { name, rate });
    }
    Ok(rate)
}
