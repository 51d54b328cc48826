//! Order State Machine Service
//!
//! Validates lifecycle transitions and produces new order snapshots.

use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::order_execution::aggregate::Order;
use crate::domain::order_execution::errors::OrderError;
use crate::domain::order_execution::events::OrderEvent;
use crate::domain::order_execution::value_objects::OrderStatus;

/// Applies lifecycle events to orders, stamping each with the clock's time.
///
/// Transition graph:
///
/// ```text
/// Initialized     -> Submitted
/// Submitted       -> Accepted | Rejected | Canceled
/// Accepted        -> PartiallyFilled | Filled | Canceled | Expired
/// PartiallyFilled -> PartiallyFilled | Filled | Canceled | Expired
/// ```
///
/// Everything else is rejected.
#[derive(Clone)]
pub struct OrderStateMachine {
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for OrderStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStateMachine").finish_non_exhaustive()
    }
}

impl OrderStateMachine {
    /// Create a state machine stamping transitions with `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Apply `event` to `order`, returning the next snapshot.
    ///
    /// The input snapshot is never modified.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if the event does not apply to the
    /// current status, `Overfill` if a fill exceeds the remaining quantity, or
    /// `InvalidPrice` if the average fill price overflows.
    pub fn apply(&self, order: &Order, event: &OrderEvent) -> Result<Order, OrderError> {
        let from = order.status();
        let to = Self::target_status(order, event);
        Self::validate_transition(from, to).map_err(|reason| {
            OrderError::InvalidStateTransition {
                client_order_id: order.client_order_id().clone(),
                from,
                to,
                reason,
            }
        })?;

        let mut next = order.clone();
        match event {
            OrderEvent::Accepted { venue_order_id } => {
                next.set_venue_order_id(venue_order_id.clone());
            }
            OrderEvent::Rejected { reason } => next.set_reject_reason(reason.clone()),
            OrderEvent::Filled(fill) => {
                let leaves_qty = order.leaves_qty();
                if fill.quantity() > leaves_qty {
                    return Err(OrderError::Overfill {
                        client_order_id: order.client_order_id().clone(),
                        fill_qty: fill.quantity(),
                        leaves_qty,
                    });
                }
                next.push_fill(fill.clone())?;
            }
            OrderEvent::Submitted | OrderEvent::Canceled | OrderEvent::Expired => {}
        }
        next.transition(to, self.clock.now());
        Ok(next)
    }

    /// Status an event would move the order to.
    ///
    /// A fill completes the order when it covers the remaining quantity;
    /// over-large fills are caught separately as overfills.
    #[must_use]
    pub fn target_status(order: &Order, event: &OrderEvent) -> OrderStatus {
        match event {
            OrderEvent::Submitted => OrderStatus::Submitted,
            OrderEvent::Accepted { .. } => OrderStatus::Accepted,
            OrderEvent::Rejected { .. } => OrderStatus::Rejected,
            OrderEvent::Canceled => OrderStatus::Canceled,
            OrderEvent::Expired => OrderStatus::Expired,
            OrderEvent::Filled(fill) => {
                if fill.quantity() >= order.leaves_qty() {
                    OrderStatus::Filled
                } else {
                    OrderStatus::PartiallyFilled
                }
            }
        }
    }

    /// Check if a state transition is valid.
    #[must_use]
    pub const fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        matches!(
            (from, to),
            // From Initialized
            (OrderStatus::Initialized, OrderStatus::Submitted)
                // From Submitted
                | (OrderStatus::Submitted, OrderStatus::Accepted)
                | (OrderStatus::Submitted, OrderStatus::Rejected)
                | (OrderStatus::Submitted, OrderStatus::Canceled)
                // From Accepted
                | (OrderStatus::Accepted, OrderStatus::PartiallyFilled)
                | (OrderStatus::Accepted, OrderStatus::Filled)
                | (OrderStatus::Accepted, OrderStatus::Canceled)
                | (OrderStatus::Accepted, OrderStatus::Expired)
                // From PartiallyFilled
                | (OrderStatus::PartiallyFilled, OrderStatus::PartiallyFilled)
                | (OrderStatus::PartiallyFilled, OrderStatus::Filled)
                | (OrderStatus::PartiallyFilled, OrderStatus::Canceled)
                | (OrderStatus::PartiallyFilled, OrderStatus::Expired)
        )
    }

    /// Validate a state transition.
    ///
    /// # Errors
    ///
    /// Returns the human-readable reason if the transition is invalid.
    pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), String> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(Self::transition_error_reason(from, to))
        }
    }

    /// Get a human-readable reason for an invalid transition.
    #[must_use]
    pub fn transition_error_reason(from: OrderStatus, to: OrderStatus) -> String {
        match from {
            OrderStatus::Filled => format!("Order is already filled, cannot transition to {to}"),
            OrderStatus::Canceled => format!("Order is canceled, cannot transition to {to}"),
            OrderStatus::Rejected => format!("Order was rejected, cannot transition to {to}"),
            OrderStatus::Expired => format!("Order has expired, cannot transition to {to}"),
            _ => format!("Invalid transition from {from} to {to}"),
        }
    }

    /// Get all valid next states from a given state.
    #[must_use]
    pub fn valid_next_states(from: OrderStatus) -> Vec<OrderStatus> {
        match from {
            OrderStatus::Initialized => vec![OrderStatus::Submitted],
            OrderStatus::Submitted => vec![
                OrderStatus::Accepted,
                OrderStatus::Rejected,
                OrderStatus::Canceled,
            ],
            OrderStatus::Accepted | OrderStatus::PartiallyFilled => vec![
                OrderStatus::PartiallyFilled,
                OrderStatus::Filled,
                OrderStatus::Canceled,
                OrderStatus::Expired,
            ],
            // Terminal states
            OrderStatus::Filled
            | OrderStatus::Canceled
            | OrderStatus::Rejected
            | OrderStatus::Expired => vec![],
        }
    }
}
