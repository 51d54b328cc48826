//! Instrument definition used for rounding and settlement.

use serde::{Deserialize, Serialize};

use super::{Currency, InstrumentId, MAX_CURRENCY_PRECISION, Price, Quantity};
use crate::domain::shared::DomainError;

/// The parts of an instrument definition the execution core needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    id: InstrumentId,
    quote_currency: Currency,
    price_precision: u8,
    size_precision: u8,
}

impl Instrument {
    /// Create an instrument definition.
    ///
    /// # Errors
    ///
    /// Returns error if either precision exceeds the supported decimal places.
    pub fn new(
        id: InstrumentId,
        quote_currency: Currency,
        price_precision: u8,
        size_precision: u8,
    ) -> Result<Self, DomainError> {
        for (field, precision) in [
            ("price_precision", price_precision),
            ("size_precision", size_precision),
        ] {
            if precision > MAX_CURRENCY_PRECISION {
                return Err(DomainError::InvalidValue {
                    field: field.to_string(),
                    message: format!(
                        "{precision} exceeds maximum {MAX_CURRENCY_PRECISION} for {id}"
                    ),
                });
            }
        }
        Ok(Self {
            id,
            quote_currency,
            price_precision,
            size_precision,
        })
    }

    /// Get the instrument ID.
    #[must_use]
    pub const fn id(&self) -> &InstrumentId {
        &self.id
    }

    /// Get the quote currency.
    #[must_use]
    pub const fn quote_currency(&self) -> Currency {
        self.quote_currency
    }

    /// Get the price precision.
    #[must_use]
    pub const fn price_precision(&self) -> u32 {
        self.price_precision as u32
    }

    /// Get the size precision.
    #[must_use]
    pub const fn size_precision(&self) -> u32 {
        self.size_precision as u32
    }

    /// Round a price to this instrument's tick precision.
    #[must_use]
    pub fn round_price(&self, price: Price) -> Price {
        price.round_to(self.price_precision())
    }

    /// Round a quantity to this instrument's size precision.
    #[must_use]
    pub fn round_quantity(&self, quantity: Quantity) -> Quantity {
        quantity.round_to(self.size_precision())
    }
}
