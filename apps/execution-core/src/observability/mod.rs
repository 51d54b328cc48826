//! Observability module for metrics.
//!
//! Tracing subscriber setup lives in [`crate::telemetry`].

mod metrics;

pub use metrics::{
    record_commission, record_order_created, record_order_transition,
    record_order_transition_rejected, record_timer_event, update_open_orders,
};
