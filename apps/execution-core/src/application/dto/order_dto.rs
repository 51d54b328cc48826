//! Order DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::{Order, OrderSide, OrderStatus, OrderType};
use crate::domain::shared::{InstrumentId, Money, Price, Quantity};

/// Request to create an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderDto {
    /// Instrument to trade.
    pub instrument_id: InstrumentId,
    /// Side.
    pub side: OrderSide,
    /// Type.
    pub order_type: OrderType,
    /// Quantity before rounding.
    pub quantity: Quantity,
    /// Limit price before rounding (limit orders only).
    #[serde(default)]
    pub limit_price: Option<Price>,
}

impl CreateOrderDto {
    /// A market order request.
    #[must_use]
    pub const fn market(instrument_id: InstrumentId, side: OrderSide, quantity: Quantity) -> Self {
        Self {
            instrument_id,
            side,
            order_type: OrderType::Market,
            quantity,
            limit_price: None,
        }
    }

    /// A limit order request.
    #[must_use]
    pub const fn limit(
        instrument_id: InstrumentId,
        side: OrderSide,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        Self {
            instrument_id,
            side,
            order_type: OrderType::Limit,
            quantity,
            limit_price: Some(price),
        }
    }
}

/// Flat view of an order snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    /// Client order ID.
    pub client_order_id: String,
    /// Venue order ID.
    pub venue_order_id: Option<String>,
    /// Instrument ID.
    pub instrument_id: String,
    /// Side.
    pub side: OrderSide,
    /// Type.
    pub order_type: OrderType,
    /// Status.
    pub status: OrderStatus,
    /// Quantity.
    pub quantity: Decimal,
    /// Filled quantity.
    pub filled_qty: Decimal,
    /// Remaining quantity.
    pub leaves_qty: Decimal,
    /// Limit price.
    pub limit_price: Option<Decimal>,
    /// Average fill price.
    pub avg_px: Option<Decimal>,
    /// Created at (RFC 3339).
    pub created_at: String,
    /// Updated at (RFC 3339).
    pub updated_at: String,
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self {
            client_order_id: order.client_order_id().to_string(),
            venue_order_id: order.venue_order_id().map(ToString::to_string),
            instrument_id: order.instrument_id().to_string(),
            side: order.side(),
            order_type: order.order_type(),
            status: order.status(),
            quantity: order.quantity().amount(),
            filled_qty: order.filled_qty().amount(),
            leaves_qty: order.leaves_qty().amount(),
            limit_price: order.limit_price().map(|p| p.amount()),
            avg_px: order.avg_px().map(|p| p.amount()),
            created_at: order.created_at().to_rfc3339(),
            updated_at: order.updated_at().to_rfc3339(),
        }
    }
}

/// Outcome of applying an execution event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    /// The new order snapshot.
    pub order: Order,
    /// Commission on the fill, for fill events.
    pub commission: Option<Money>,
}
