//! Metrics for the execution core.
//!
//! Recorded through the `metrics` facade. The core installs no exporter, so
//! every call is a no-op until the embedding process installs a recorder.
//!
//! # Example
//!
//! ```ignore
//! use execution_core::observability::record_order_created;
//!
//! record_order_created("limit");
//! ```

use metrics::{counter, gauge, histogram};

// ============================================================================
// Order Lifecycle Metrics
// ============================================================================

/// Record an order built by the factory.
///
/// # Arguments
///
/// * `order_type` - Order type label (`"market"`, `"limit"`)
pub fn record_order_created(order_type: &str) {
    counter!(
        "orders_created_total",
        "order_type" => order_type.to_string()
    )
    .increment(1);
}

/// Record an applied lifecycle transition.
///
/// # Arguments
///
/// * `to` - Status the order moved to (e.g. `"ACCEPTED"`)
pub fn record_order_transition(to: &str) {
    counter!(
        "order_transitions_total",
        "to" => to.to_string()
    )
    .increment(1);
}

/// Record a lifecycle event the state machine refused.
///
/// # Arguments
///
/// * `reason` - Error reason (e.g. `"INVALID_STATE_TRANSITION"`, `"OVERFILL"`)
pub fn record_order_transition_rejected(reason: &str) {
    counter!(
        "order_transitions_rejected_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Update the open orders gauge.
///
/// # Arguments
///
/// * `count` - Current number of non-terminal orders
pub fn update_open_orders(count: usize) {
    #[allow(clippy::cast_precision_loss)]
    gauge!("open_orders").set(count as f64);
}

// ============================================================================
// Clock Metrics
// ============================================================================

/// Record a timer firing.
///
/// # Arguments
///
/// * `clock` - Clock kind (`"live"`, `"simulated"`)
pub fn record_timer_event(clock: &str) {
    counter!(
        "timer_events_total",
        "clock" => clock.to_string()
    )
    .increment(1);
}

// ============================================================================
// Commission Metrics
// ============================================================================

/// Record a commission charged on a fill.
///
/// # Arguments
///
/// * `currency` - Settlement currency code
/// * `amount` - Commission in that currency
pub fn record_commission(currency: &str, amount: f64) {
    histogram!(
        "commission_amount",
        "currency" => currency.to_string()
    )
    .record(amount);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_noop() {
        record_order_created("market");
        record_order_transition("ACCEPTED");
        record_order_transition_rejected("OVERFILL");
        update_open_orders(3);
        record_timer_event("simulated");
        record_commission("USD", 32.6);
    }
}
