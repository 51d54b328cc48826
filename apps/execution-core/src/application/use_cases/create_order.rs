//! Create Order Use Case

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::application::dto::CreateOrderDto;
use crate::application::ports::InstrumentCatalogPort;
use crate::domain::order_execution::{Order, OrderError, OrderFactory, OrderRepository, OrderType};
use crate::error::ExecutionError;
use crate::observability::record_order_created;

/// Use case for creating orders.
///
/// Looks up the instrument, builds the order through the factory (which
/// rounds quantity and price to the instrument's precision) and stores the
/// first snapshot.
pub struct CreateOrderUseCase<O, C>
where
    O: OrderRepository,
    C: InstrumentCatalogPort,
{
    factory: Arc<OrderFactory>,
    catalog: Arc<C>,
    order_repo: Arc<O>,
}

impl<O, C> CreateOrderUseCase<O, C>
where
    O: OrderRepository,
    C: InstrumentCatalogPort,
{
    /// Create a new `CreateOrderUseCase`.
    pub const fn new(factory: Arc<OrderFactory>, catalog: Arc<C>, order_repo: Arc<O>) -> Self {
        Self {
            factory,
            catalog,
            order_repo,
        }
    }

    /// Create and store an order.
    ///
    /// # Errors
    ///
    /// Returns `INSTRUMENT_NOT_FOUND` for an unknown instrument,
    /// `INVALID_QUANTITY` / `INVALID_PRICE` for rejected terms, or
    /// `INVALID_IDENTITY` if the day's sequence is exhausted.
    pub fn execute(&self, request: &CreateOrderDto) -> Result<Order, ExecutionError> {
        let instrument = self
            .catalog
            .instrument(&request.instrument_id)
            .ok_or_else(|| OrderError::InstrumentNotFound {
                instrument_id: request.instrument_id.clone(),
            })?;

        let order = match (request.order_type, request.limit_price) {
            (OrderType::Market, None) => {
                self.factory
                    .market(&instrument, request.side, request.quantity)?
            }
            (OrderType::Limit, Some(price)) => {
                self.factory
                    .limit(&instrument, request.side, request.quantity, price)?
            }
            (OrderType::Market, Some(price)) => {
                return Err(OrderError::InvalidPrice {
                    price: price.amount(),
                    reason: "market orders do not take a limit price".to_string(),
                }
                .into());
            }
            (OrderType::Limit, None) => {
                return Err(OrderError::InvalidPrice {
                    price: Decimal::ZERO,
                    reason: "limit orders require a limit price".to_string(),
                }
                .into());
            }
        };

        self.order_repo.save(&order)?;
        record_order_created(order.order_type().as_label());

        tracing::debug!(
            client_order_id = %order.client_order_id(),
            instrument_id = %order.instrument_id(),
            side = ?order.side(),
            order_type = order.order_type().as_label(),
            quantity = %order.quantity(),
            "Order created"
        );

        Ok(order)
    }
}
