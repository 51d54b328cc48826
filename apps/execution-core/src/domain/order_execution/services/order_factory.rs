//! Order Factory
//!
//! Builds `Initialized` orders for one trader and strategy.

use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::order_execution::aggregate::{NewOrder, Order};
use crate::domain::order_execution::errors::OrderError;
use crate::domain::order_execution::services::ClientOrderIdGenerator;
use crate::domain::order_execution::value_objects::{OrderSide, OrderType, validate_scope};
use crate::domain::shared::{Instrument, Price, Quantity, StrategyId, TraderId};

/// Creates orders stamped with the clock's time and a fresh identity.
///
/// Quantities and prices are rounded half-to-even to the instrument's
/// precision. Inputs are validated before an identity is drawn, so rejected
/// requests never consume sequence numbers.
#[derive(Clone)]
pub struct OrderFactory {
    trader_id: TraderId,
    strategy_id: StrategyId,
    clock: Arc<dyn Clock>,
    generator: Arc<ClientOrderIdGenerator>,
}

impl std::fmt::Debug for OrderFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderFactory")
            .field("trader_id", &self.trader_id)
            .field("strategy_id", &self.strategy_id)
            .finish_non_exhaustive()
    }
}

impl OrderFactory {
    /// Create a factory for one trader and strategy.
    ///
    /// # Errors
    ///
    /// Returns `Identity` if either scope cannot be embedded in a client order id.
    pub fn new(
        trader_id: TraderId,
        strategy_id: StrategyId,
        clock: Arc<dyn Clock>,
        generator: Arc<ClientOrderIdGenerator>,
    ) -> Result<Self, OrderError> {
        validate_scope("trader_id", trader_id.as_str())?;
        validate_scope("strategy_id", strategy_id.as_str())?;
        Ok(Self {
            trader_id,
            strategy_id,
            clock,
            generator,
        })
    }

    /// Get the trader ID.
    #[must_use]
    pub const fn trader_id(&self) -> &TraderId {
        &self.trader_id
    }

    /// Get the strategy ID.
    #[must_use]
    pub const fn strategy_id(&self) -> &StrategyId {
        &self.strategy_id
    }

    /// Create a market order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` if the quantity is not positive or rounds to zero.
    pub fn market(
        &self,
        instrument: &Instrument,
        side: OrderSide,
        quantity: Quantity,
    ) -> Result<Order, OrderError> {
        let quantity = Self::checked_quantity(instrument, quantity)?;
        self.build(instrument, side, OrderType::Market, quantity, None)
    }

    /// Create a limit order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` or `InvalidPrice` if either is not positive or
    /// rounds to zero.
    pub fn limit(
        &self,
        instrument: &Instrument,
        side: OrderSide,
        quantity: Quantity,
        price: Price,
    ) -> Result<Order, OrderError> {
        let quantity = Self::checked_quantity(instrument, quantity)?;
        let price = Self::checked_price(instrument, price)?;
        self.build(instrument, side, OrderType::Limit, quantity, Some(price))
    }

    fn build(
        &self,
        instrument: &Instrument,
        side: OrderSide,
        order_type: OrderType,
        quantity: Quantity,
        limit_price: Option<Price>,
    ) -> Result<Order, OrderError> {
        let identity = self.generator.generate(&self.trader_id, &self.strategy_id)?;
        Order::new(NewOrder {
            identity,
            instrument_id: instrument.id().clone(),
            side,
            order_type,
            quantity,
            limit_price,
            created_at: self.clock.now(),
        })
    }

    fn checked_quantity(instrument: &Instrument, quantity: Quantity) -> Result<Quantity, OrderError> {
        if !quantity.is_positive() {
            return Err(OrderError::InvalidQuantity {
                quantity: quantity.amount(),
                reason: "order quantity must be positive".to_string(),
            });
        }
        let rounded = instrument.round_quantity(quantity);
        if rounded.is_zero() {
            return Err(OrderError::InvalidQuantity {
                quantity: quantity.amount(),
                reason: format!(
                    "rounds to zero at size precision {}",
                    instrument.size_precision()
                ),
            });
        }
        Ok(rounded)
    }

    fn checked_price(instrument: &Instrument, price: Price) -> Result<Price, OrderError> {
        if !price.is_positive() {
            return Err(OrderError::InvalidPrice {
                price: price.amount(),
                reason: "limit price must be positive".to_string(),
            });
        }
        let rounded = instrument.round_price(price);
        if !rounded.is_positive() {
            return Err(OrderError::InvalidPrice {
                price: price.amount(),
                reason: format!(
                    "rounds to zero at price precision {}",
                    instrument.price_precision()
                ),
            });
        }
        Ok(rounded)
    }
}
