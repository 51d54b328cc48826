//! Commission errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when configuring or evaluating a commission model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommissionError {
    /// Filled quantity is zero or negative.
    #[error("Invalid filled quantity {quantity}: must be positive")]
    InvalidQuantity {
        /// Quantity as supplied.
        quantity: Decimal,
    },

    /// Filled price is negative.
    #[error("Invalid filled price {price}: must not be negative")]
    InvalidPrice {
        /// Price as supplied.
        price: Decimal,
    },

    /// Exchange rate is zero or negative.
    #[error("Invalid exchange rate {rate}: must be positive")]
    InvalidExchangeRate {
        /// Rate as supplied.
        rate: Decimal,
    },

    /// Notional is negative.
    #[error("Invalid notional {notional}: must not be negative")]
    InvalidNotional {
        /// Notional as supplied.
        notional: Decimal,
    },

    /// The product of two terms exceeds the decimal range.
    #[error("Commission term {left} x {right} exceeds the decimal range")]
    Overflow {
        /// Left-hand factor.
        left: Decimal,
        /// Right-hand factor.
        right: Decimal,
    },

    /// A configured rate is negative.
    #[error("Invalid {name} {rate}: must not be negative")]
    InvalidRate {
        /// Which rate.
        name: &'static str,
        /// Rate as supplied.
        rate: Decimal,
    },

    /// A configured minimum is negative.
    #[error("Invalid minimum commission {amount}: must not be negative")]
    InvalidMinimum {
        /// Minimum as supplied.
        amount: Decimal,
    },
}
