//! Commission model configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::commission::{
    CommissionError, CommissionModel, GenericCommissionModel, MakerTakerCommissionModel,
    MinimumCommissions,
};
use crate::domain::shared::{Currency, InstrumentId, Money};

/// Commission configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionConfig {
    /// Rate schedule.
    #[serde(flatten)]
    pub model: CommissionModelConfig,
    /// Minimum commissions.
    #[serde(default)]
    pub minimums: Vec<MinimumCommissionConfig>,
}

impl Default for CommissionConfig {
    fn default() -> Self {
        Self {
            model: CommissionModelConfig::Generic {
                rate: GenericCommissionModel::DEFAULT_RATE,
            },
            minimums: Vec::new(),
        }
    }
}

/// Rate schedule, selected by the `model` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommissionModelConfig {
    /// One rate for both liquidity sides.
    Generic {
        /// Rate on notional.
        #[serde(default = "default_generic_rate")]
        rate: Decimal,
    },
    /// Separate maker and taker rates.
    MakerTaker {
        /// Rate for liquidity-adding fills.
        #[serde(default = "default_maker_rate")]
        maker_rate: Decimal,
        /// Rate for liquidity-taking fills.
        #[serde(default = "default_taker_rate")]
        taker_rate: Decimal,
    },
}

/// A minimum commission, optionally scoped to one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumCommissionConfig {
    /// Settlement currency of the minimum.
    pub currency: Currency,
    /// Minimum amount.
    pub amount: Decimal,
    /// Instrument the minimum applies to; all instruments when absent.
    #[serde(default)]
    pub instrument: Option<InstrumentId>,
}

impl CommissionConfig {
    /// Build the configured model.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRate` for a negative rate or `InvalidMinimum` for a
    /// negative minimum.
    pub fn build(&self) -> Result<Box<dyn CommissionModel>, CommissionError> {
        let minimums = self.minimums()?;
        Ok(match self.model {
            CommissionModelConfig::Generic { rate } => {
                Box::new(GenericCommissionModel::new(rate)?.with_minimums(minimums))
            }
            CommissionModelConfig::MakerTaker {
                maker_rate,
                taker_rate,
            } => Box::new(
                MakerTakerCommissionModel::new(maker_rate, taker_rate)?.with_minimums(minimums),
            ),
        })
    }

    fn minimums(&self) -> Result<MinimumCommissions, CommissionError> {
        self.minimums
            .iter()
            .try_fold(MinimumCommissions::new(), |acc, m| {
                let amount = Money::new(m.amount, m.currency);
                match &m.instrument {
                    Some(id) => acc.with_instrument_minimum(id.clone(), amount),
                    None => acc.with_currency_minimum(amount),
                }
            })
    }
}

fn default_generic_rate() -> Decimal {
    GenericCommissionModel::DEFAULT_RATE
}

fn default_maker_rate() -> Decimal {
    MakerTakerCommissionModel::DEFAULT_MAKER_RATE
}

fn default_taker_rate() -> Decimal {
    MakerTakerCommissionModel::DEFAULT_TAKER_RATE
}
