//! Order execution errors.

use rust_decimal::Decimal;
use thiserror::Error;

use super::value_objects::{IdentityError, OrderStatus};
use crate::domain::shared::{ClientOrderId, Currency, InstrumentId, Quantity};

/// Errors that can occur in order execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Quantity is not positive, or rounds to zero at the instrument's size precision.
    #[error("Invalid quantity {quantity}: {reason}")]
    InvalidQuantity {
        /// Quantity as supplied.
        quantity: Decimal,
        /// Why it was rejected.
        reason: String,
    },

    /// Price is missing, not positive, or rounds to zero at the instrument's price precision.
    #[error("Invalid price {price}: {reason}")]
    InvalidPrice {
        /// Price as supplied.
        price: Decimal,
        /// Why it was rejected.
        reason: String,
    },

    /// The event does not apply to the order's current status.
    #[error("Invalid order state transition for {client_order_id}: {from} -> {to}: {reason}")]
    InvalidStateTransition {
        /// Order the event was applied to.
        client_order_id: ClientOrderId,
        /// Current order status.
        from: OrderStatus,
        /// Status the event would have produced.
        to: OrderStatus,
        /// Reason for failure.
        reason: String,
    },

    /// Fill quantity exceeds the remaining quantity.
    #[error("Fill of {fill_qty} overfills {client_order_id}: only {leaves_qty} remaining")]
    Overfill {
        /// Order the fill was applied to.
        client_order_id: ClientOrderId,
        /// Fill quantity attempted.
        fill_qty: Quantity,
        /// Remaining quantity.
        leaves_qty: Quantity,
    },

    /// Trader or strategy scope cannot be encoded into an identity.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Order not found.
    #[error("Order not found: {client_order_id}")]
    NotFound {
        /// Client order ID.
        client_order_id: ClientOrderId,
    },

    /// Instrument not known to the catalog.
    #[error("Instrument not found: {instrument_id}")]
    InstrumentNotFound {
        /// Instrument ID.
        instrument_id: InstrumentId,
    },

    /// A fill is quoted in a different currency than its instrument.
    #[error("Fill for {instrument_id} quoted in {actual}, instrument quotes in {expected}")]
    QuoteCurrencyMismatch {
        /// Instrument the order trades.
        instrument_id: InstrumentId,
        /// Instrument's quote currency.
        expected: Currency,
        /// Currency the fill declared.
        actual: Currency,
    },

    /// A snapshot was saved over a newer or missing predecessor.
    #[error(
        "Snapshot version {actual} of {client_order_id} does not follow stored version {expected:?}"
    )]
    ConcurrentModification {
        /// Client order ID.
        client_order_id: ClientOrderId,
        /// Latest stored version, if any.
        expected: Option<usize>,
        /// Version of the snapshot being saved.
        actual: usize,
    },
}
