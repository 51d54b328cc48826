//! Currency value object with minor-unit precision.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// Maximum decimal places supported for any currency.
pub const MAX_CURRENCY_PRECISION: u8 = 9;

/// A currency identified by its three-letter code.
///
/// `precision` is the number of minor-unit decimal places (USD = 2, JPY = 0).
/// Every `Money` amount in this currency is rounded to that precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency {
    code: [u8; 3],
    precision: u8,
}

impl Currency {
    /// US Dollar.
    pub const USD: Self = Self::from_static(*b"USD", 2);
    /// Euro.
    pub const EUR: Self = Self::from_static(*b"EUR", 2);
    /// British Pound.
    pub const GBP: Self = Self::from_static(*b"GBP", 2);
    /// Japanese Yen.
    pub const JPY: Self = Self::from_static(*b"JPY", 0);
    /// Australian Dollar.
    pub const AUD: Self = Self::from_static(*b"AUD", 2);
    /// Canadian Dollar.
    pub const CAD: Self = Self::from_static(*b"CAD", 2);
    /// Swiss Franc.
    pub const CHF: Self = Self::from_static(*b"CHF", 2);
    /// New Zealand Dollar.
    pub const NZD: Self = Self::from_static(*b"NZD", 2);
    /// Hong Kong Dollar.
    pub const HKD: Self = Self::from_static(*b"HKD", 2);
    /// Singapore Dollar.
    pub const SGD: Self = Self::from_static(*b"SGD", 2);
    /// Bitcoin.
    pub const BTC: Self = Self::from_static(*b"BTC", 8);
    /// Ether.
    pub const ETH: Self = Self::from_static(*b"ETH", 8);

    const KNOWN: [Self; 12] = [
        Self::USD,
        Self::EUR,
        Self::GBP,
        Self::JPY,
        Self::AUD,
        Self::CAD,
        Self::CHF,
        Self::NZD,
        Self::HKD,
        Self::SGD,
        Self::BTC,
        Self::ETH,
    ];

    const fn from_static(code: [u8; 3], precision: u8) -> Self {
        Self { code, precision }
    }

    /// Create a currency from a code and precision.
    ///
    /// # Errors
    ///
    /// Returns error if the code is not three ASCII uppercase letters or the
    /// precision exceeds [`MAX_CURRENCY_PRECISION`].
    pub fn new(code: &str, precision: u8) -> Result<Self, DomainError> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(DomainError::InvalidValue {
                field: "currency".to_string(),
                message: format!("'{code}' is not a three-letter uppercase code"),
            });
        }
        if precision > MAX_CURRENCY_PRECISION {
            return Err(DomainError::InvalidValue {
                field: "currency".to_string(),
                message: format!(
                    "precision {precision} exceeds maximum {MAX_CURRENCY_PRECISION}"
                ),
            });
        }
        Ok(Self {
            code: [bytes[0], bytes[1], bytes[2]],
            precision,
        })
    }

    /// Look up one of the built-in currencies by code.
    ///
    /// # Errors
    ///
    /// Returns error if the code is not a built-in currency.
    pub fn from_code(code: &str) -> Result<Self, DomainError> {
        Self::KNOWN
            .iter()
            .find(|c| c.code() == code)
            .copied()
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "Currency".to_string(),
                id: code.to_string(),
            })
    }

    /// Get the three-letter code.
    #[must_use]
    pub fn code(&self) -> &str {
        // Constructors only admit ASCII uppercase bytes.
        std::str::from_utf8(&self.code).unwrap_or("???")
    }

    /// Get the minor-unit precision.
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision as u32
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<String> for Currency {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_code(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.code().to_string()
    }
}
