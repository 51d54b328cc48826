//! Order Aggregate Root
//!
//! An order is an immutable snapshot. The state machine produces a new
//! snapshot per applied event; the previous one is never modified.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::errors::OrderError;
use crate::domain::order_execution::value_objects::{
    Fill, OrderIdentity, OrderSide, OrderStatus, OrderType,
};
use crate::domain::shared::{
    ClientOrderId, InstrumentId, Price, Quantity, Timestamp, VenueOrderId,
};

/// One recorded status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTransition {
    /// Status before the event.
    pub from: OrderStatus,
    /// Status after the event.
    pub to: OrderStatus,
    /// Clock time at which the event was applied.
    pub at: Timestamp,
}

/// Parameters for a freshly created order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Identity from the generator.
    pub identity: OrderIdentity,
    /// Instrument being traded.
    pub instrument_id: InstrumentId,
    /// Buy or sell.
    pub side: OrderSide,
    /// Market or limit.
    pub order_type: OrderType,
    /// Total quantity, already rounded to size precision.
    pub quantity: Quantity,
    /// Limit price, already rounded to price precision.
    pub limit_price: Option<Price>,
    /// Creation time from the clock.
    pub created_at: Timestamp,
}

/// Order Aggregate Root.
// Allow `order_type` field name: it is the standard order-management term.
#[allow(clippy::struct_field_names)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    identity: OrderIdentity,
    client_order_id: ClientOrderId,
    instrument_id: InstrumentId,
    side: OrderSide,
    order_type: OrderType,
    quantity: Quantity,
    limit_price: Option<Price>,
    status: OrderStatus,
    filled_qty: Quantity,
    avg_px: Option<Price>,
    fills: Vec<Fill>,
    venue_order_id: Option<VenueOrderId>,
    reject_reason: Option<String>,
    history: Vec<OrderTransition>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Order {
    /// Create an order in `Initialized`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` for a non-positive quantity, or `InvalidPrice`
    /// when a limit order lacks a positive price or a market order carries one.
    pub fn new(params: NewOrder) -> Result<Self, OrderError> {
        if !params.quantity.is_positive() {
            return Err(OrderError::InvalidQuantity {
                quantity: params.quantity.amount(),
                reason: "order quantity must be positive".to_string(),
            });
        }
        match (params.order_type.requires_limit_price(), params.limit_price) {
            (true, None) => {
                return Err(OrderError::InvalidPrice {
                    price: Decimal::ZERO,
                    reason: "limit orders require a limit price".to_string(),
                });
            }
            (true, Some(price)) if !price.is_positive() => {
                return Err(OrderError::InvalidPrice {
                    price: price.amount(),
                    reason: "limit price must be positive".to_string(),
                });
            }
            (false, Some(price)) => {
                return Err(OrderError::InvalidPrice {
                    price: price.amount(),
                    reason: "market orders do not take a limit price".to_string(),
                });
            }
            _ => {}
        }

        Ok(Self {
            client_order_id: params.identity.client_order_id(),
            identity: params.identity,
            instrument_id: params.instrument_id,
            side: params.side,
            order_type: params.order_type,
            quantity: params.quantity,
            limit_price: params.limit_price,
            status: OrderStatus::Initialized,
            filled_qty: Quantity::ZERO,
            avg_px: None,
            fills: Vec::new(),
            venue_order_id: None,
            reject_reason: None,
            history: Vec::new(),
            created_at: params.created_at,
            updated_at: params.created_at,
        })
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the order identity.
    #[must_use]
    pub const fn identity(&self) -> &OrderIdentity {
        &self.identity
    }

    /// Get the rendered client order ID.
    #[must_use]
    pub const fn client_order_id(&self) -> &ClientOrderId {
        &self.client_order_id
    }

    /// Get the instrument ID.
    #[must_use]
    pub const fn instrument_id(&self) -> &InstrumentId {
        &self.instrument_id
    }

    /// Get the order side.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Get the order type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Get the order quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Get the limit price.
    #[must_use]
    pub const fn limit_price(&self) -> Option<Price> {
        self.limit_price
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Get the cumulative filled quantity.
    #[must_use]
    pub const fn filled_qty(&self) -> Quantity {
        self.filled_qty
    }

    /// Get the remaining quantity.
    #[must_use]
    pub fn leaves_qty(&self) -> Quantity {
        self.quantity - self.filled_qty
    }

    /// Volume-weighted average fill price, once anything has filled.
    #[must_use]
    pub const fn avg_px(&self) -> Option<Price> {
        self.avg_px
    }

    /// Fills applied so far, in arrival order.
    #[must_use]
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Get the venue order ID once accepted.
    #[must_use]
    pub const fn venue_order_id(&self) -> Option<&VenueOrderId> {
        self.venue_order_id.as_ref()
    }

    /// Get the reject reason, if rejected.
    #[must_use]
    pub fn reject_reason(&self) -> Option<&str> {
        self.reject_reason.as_deref()
    }

    /// Status changes applied so far.
    #[must_use]
    pub fn history(&self) -> &[OrderTransition] {
        &self.history
    }

    /// Snapshot version: the number of transitions applied.
    #[must_use]
    pub fn version(&self) -> usize {
        self.history.len()
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Get the timestamp of the last transition.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns true if the order is in a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    // ========================================================================
    // Snapshot construction (state machine only)
    // ========================================================================

    pub(crate) fn transition(&mut self, to: OrderStatus, at: Timestamp) {
        self.history.push(OrderTransition {
            from: self.status,
            to,
            at,
        });
        self.status = to;
        self.updated_at = at;
    }

    pub(crate) fn set_venue_order_id(&mut self, venue_order_id: VenueOrderId) {
        self.venue_order_id = Some(venue_order_id);
    }

    pub(crate) fn set_reject_reason(&mut self, reason: String) {
        self.reject_reason = Some(reason);
    }

    /// Accumulate a fill. The caller has already checked it against `leaves_qty`.
    ///
    /// Leaves the snapshot untouched if the volume-weighted price cannot be
    /// represented.
    pub(crate) fn push_fill(&mut self, fill: Fill) -> Result<(), OrderError> {
        let fill_qty = fill.quantity();
        let new_filled = self.filled_qty + fill_qty;
        let prior_px = self.avg_px.map_or(Decimal::ZERO, |p| p.amount());
        let avg_px = prior_px
            .checked_mul(self.filled_qty.amount())
            .zip(fill.price().amount().checked_mul(fill_qty.amount()))
            .and_then(|(old_value, fill_value)| old_value.checked_add(fill_value))
            .and_then(|total| total.checked_div(new_filled.amount()))
            .ok_or_else(|| OrderError::InvalidPrice {
                price: fill.price().amount(),
                reason: "average fill price exceeds the decimal range".to_string(),
            })?;
        self.avg_px = Some(Price::new(avg_px));
        self.filled_qty = new_filled;
        self.fills.push(fill);
        Ok(())
    }
}
