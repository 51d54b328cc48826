//! Structured errors for the execution core.
//!
//! Every failure that crosses the application boundary is an
//! [`ExecutionError`]: a stable [`ErrorCode`], a human-readable message and
//! key-value context for debugging.
//!
//! | Code | Caller error | Usage |
//! |------|--------------|-------|
//! | `INVALID_QUANTITY` | yes | Quantity not positive or rounds to zero |
//! | `INVALID_PRICE` | yes | Price missing, not positive or rounds to zero |
//! | `INVALID_IDENTITY` | yes | Trader/strategy scope or client order id malformed |
//! | `INVALID_STATE_TRANSITION` | yes | Event does not apply to the order's status |
//! | `OVERFILL` | yes | Fill exceeds remaining quantity |
//! | `INVALID_COMMISSION_INPUT` | yes | Commission inputs rejected |
//! | `DUPLICATE_TIMER_NAME` | yes | Timer name already active |
//! | `INVALID_TIMER` | yes | Timer spec rejected by the clock |
//! | `ORDER_NOT_FOUND` | yes | Unknown client order id |
//! | `INSTRUMENT_NOT_FOUND` | yes | Unknown instrument |
//! | `CONCURRENT_MODIFICATION` | no | Stale snapshot saved |
//! | `INTERNAL_ERROR` | no | Unexpected failure |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::clock::ClockError;
use crate::domain::commission::CommissionError;
use crate::domain::order_execution::{IdentityError, OrderError};

/// Error codes for the execution core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Quantity rejected.
    InvalidQuantity,
    /// Price rejected.
    InvalidPrice,
    /// Malformed trader/strategy scope or client order id.
    InvalidIdentity,
    /// Lifecycle event not allowed from the current status.
    InvalidStateTransition,
    /// Fill larger than the remaining quantity.
    Overfill,
    /// Rejected commission inputs.
    InvalidCommissionInput,
    /// Timer name already active.
    DuplicateTimerName,
    /// Rejected timer registration.
    InvalidTimer,
    /// Order not found.
    OrderNotFound,
    /// Instrument not found.
    InstrumentNotFound,
    /// Snapshot saved over a newer one.
    ConcurrentModification,
    /// Internal error.
    InternalError,
}

impl ErrorCode {
    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::InvalidPrice => "INVALID_PRICE",
            Self::InvalidIdentity => "INVALID_IDENTITY",
            Self::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            Self::Overfill => "OVERFILL",
            Self::InvalidCommissionInput => "INVALID_COMMISSION_INPUT",
            Self::DuplicateTimerName => "DUPLICATE_TIMER_NAME",
            Self::InvalidTimer => "INVALID_TIMER",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::InstrumentNotFound => "INSTRUMENT_NOT_FOUND",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller can fix the failure by changing its input.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        !matches!(self, Self::ConcurrentModification | Self::InternalError)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A rich error with context for the execution core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionError {
    /// Error code.
    code: ErrorCode,
    /// Human-readable message.
    message: String,
    /// Additional context (key-value pairs).
    context: Vec<(String, String)>,
}

impl ExecutionError {
    /// Create a new execution error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Look up a context value.
    #[must_use]
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Convert to a serializable response body.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            details: self.context.iter().cloned().collect(),
        }
    }

    /// Order not found.
    #[must_use]
    pub fn order_not_found(client_order_id: &str) -> Self {
        Self::new(
            ErrorCode::OrderNotFound,
            format!("Order {client_order_id} not found"),
        )
        .with_context("client_order_id", client_order_id)
    }

    /// Instrument not found.
    #[must_use]
    pub fn instrument_not_found(instrument_id: &str) -> Self {
        Self::new(
            ErrorCode::InstrumentNotFound,
            format!("Instrument {instrument_id} not found"),
        )
        .with_context("instrument_id", instrument_id)
    }

    /// Internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

impl std::error::Error for ExecutionError {}

/// Serializable error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Additional details.
    pub details: HashMap<String, String>,
}

impl From<OrderError> for ExecutionError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::InvalidQuantity { quantity, .. } => {
                Self::new(ErrorCode::InvalidQuantity, message)
                    .with_context("quantity", quantity.to_string())
            }
            OrderError::InvalidPrice { price, .. } => {
                Self::new(ErrorCode::InvalidPrice, message)
                    .with_context("price", price.to_string())
            }
            OrderError::InvalidStateTransition {
                client_order_id,
                from,
                to,
                ..
            } => Self::new(ErrorCode::InvalidStateTransition, message)
                .with_context("client_order_id", client_order_id.to_string())
                .with_context("from", from.to_string())
                .with_context("to", to.to_string()),
            OrderError::Overfill {
                client_order_id,
                fill_qty,
                leaves_qty,
            } => Self::new(ErrorCode::Overfill, message)
                .with_context("client_order_id", client_order_id.to_string())
                .with_context("fill_qty", fill_qty.to_string())
                .with_context("leaves_qty", leaves_qty.to_string()),
            OrderError::Identity(_) => Self::new(ErrorCode::InvalidIdentity, message),
            OrderError::NotFound { client_order_id } => {
                Self::order_not_found(client_order_id.as_str())
            }
            OrderError::InstrumentNotFound { instrument_id } => {
                Self::instrument_not_found(instrument_id.as_str())
            }
            OrderError::QuoteCurrencyMismatch {
                instrument_id,
                expected,
                actual,
            } => Self::new(ErrorCode::InvalidCommissionInput, message)
                .with_context("instrument_id", instrument_id.to_string())
                .with_context("expected", expected.code())
                .with_context("actual", actual.code()),
            OrderError::ConcurrentModification {
                client_order_id,
                actual,
                ..
            } => Self::new(ErrorCode::ConcurrentModification, message)
                .with_context("client_order_id", client_order_id.to_string())
                .with_context("version", actual.to_string()),
        }
    }
}

impl From<IdentityError> for ExecutionError {
    fn from(err: IdentityError) -> Self {
        Self::new(ErrorCode::InvalidIdentity, err.to_string())
    }
}

impl From<CommissionError> for ExecutionError {
    fn from(err: CommissionError) -> Self {
        Self::new(ErrorCode::InvalidCommissionInput, err.to_string())
    }
}

impl From<ClockError> for ExecutionError {
    fn from(err: ClockError) -> Self {
        match err {
            ClockError::NonMonotonic { .. } => Self::internal(err.to_string()),
            ClockError::DuplicateTimerName { ref name } => {
                Self::new(ErrorCode::DuplicateTimerName, err.to_string())
                    .with_context("timer", name.clone())
            }
            _ => Self::new(ErrorCode::InvalidTimer, err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::OrderStatus;
    use crate::domain::shared::ClientOrderId;
    use rust_decimal_macros::dec;

    #[test]
    fn error_code_caller_classification() {
        assert!(ErrorCode::InvalidQuantity.is_caller_error());
        assert!(ErrorCode::OrderNotFound.is_caller_error());
        assert!(!ErrorCode::ConcurrentModification.is_caller_error());
        assert!(!ErrorCode::InternalError.is_caller_error());
    }

    #[test]
    fn execution_error_creation() {
        let error = ExecutionError::new(ErrorCode::InvalidQuantity, "Bad quantity")
            .with_context("field", "quantity")
            .with_context("value", "-1");

        assert_eq!(error.code(), ErrorCode::InvalidQuantity);
        assert_eq!(error.message(), "Bad quantity");
        assert_eq!(error.context().len(), 2);
        assert_eq!(error.context_value("value"), Some("-1"));
    }

    #[test]
    fn from_invalid_transition_carries_statuses() {
        let error: ExecutionError = OrderError::InvalidStateTransition {
            client_order_id: ClientOrderId::new("O-T1.S1-20260119-000001"),
            from: OrderStatus::Filled,
            to: OrderStatus::Canceled,
            reason: "terminal".to_string(),
        }
        .into();

        assert_eq!(error.code(), ErrorCode::InvalidStateTransition);
        assert_eq!(error.context_value("from"), Some("FILLED"));
        assert_eq!(error.context_value("to"), Some("CANCELED"));
    }

    #[test]
    fn from_commission_error() {
        let error: ExecutionError = CommissionError::InvalidQuantity {
            quantity: dec!(0),
        }
        .into();
        assert_eq!(error.code(), ErrorCode::InvalidCommissionInput);
    }

    #[test]
    fn from_duplicate_timer() {
        let error: ExecutionError = ClockError::DuplicateTimerName {
            name: "heartbeat".to_string(),
        }
        .into();
        assert_eq!(error.code().reason(), "DUPLICATE_TIMER_NAME");
        assert_eq!(error.context_value("timer"), Some("heartbeat"));
    }

    #[test]
    fn to_response() {
        let response = ExecutionError::instrument_not_found("GBPUSD").to_response();

        assert_eq!(response.code, "INSTRUMENT_NOT_FOUND");
        assert_eq!(
            response.details.get("instrument_id").map(String::as_str),
            Some("GBPUSD")
        );
    }

    #[test]
    fn error_display() {
        let error = ExecutionError::internal("boom");
        assert_eq!(error.to_string(), "[INTERNAL_ERROR] boom");
    }
}
