//! Instrument definitions loaded into the catalog.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Currency, DomainError, Instrument, InstrumentId};

/// One tradeable instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Instrument ID.
    pub id: InstrumentId,
    /// Currency prices are quoted in.
    pub quote_currency: Currency,
    /// Decimal places of prices.
    pub price_precision: u8,
    /// Decimal places of quantities.
    #[serde(default)]
    pub size_precision: u8,
}

impl InstrumentConfig {
    /// Build the domain instrument.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if a precision exceeds the supported maximum.
    pub fn to_instrument(&self) -> Result<Instrument, DomainError> {
        Instrument::new(
            self.id.clone(),
            self.quote_currency,
            self.price_precision,
            self.size_precision,
        )
    }
}
