//! Apply Execution Event Use Case

use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::prelude::ToPrimitive;

use crate::application::dto::ExecutionReport;
use crate::application::ports::InstrumentCatalogPort;
use crate::application::use_cases::expiry_timer_name;
use crate::domain::clock::Clock;
use crate::domain::commission::CommissionModel;
use crate::domain::order_execution::{
    Fill, Order, OrderError, OrderEvent, OrderRepository, OrderStateMachine,
};
use crate::domain::shared::{ClientOrderId, Money, VenueOrderId};
use crate::error::ExecutionError;
use crate::observability::{
    record_commission, record_order_transition, record_order_transition_rejected,
};

/// Use case for applying venue and strategy events to stored orders.
///
/// Each call loads the latest snapshot, runs the state machine and appends
/// the resulting snapshot. Calls are serialized so two events for the same
/// order never race on the same predecessor.
pub struct ApplyExecutionEventUseCase<O, C>
where
    O: OrderRepository,
    C: InstrumentCatalogPort,
{
    state_machine: OrderStateMachine,
    commission_model: Arc<dyn CommissionModel>,
    catalog: Arc<C>,
    order_repo: Arc<O>,
    clock: Arc<dyn Clock>,
    lock: Mutex<()>,
}

impl<O, C> ApplyExecutionEventUseCase<O, C>
where
    O: OrderRepository,
    C: InstrumentCatalogPort,
{
    /// Create a new `ApplyExecutionEventUseCase`.
    pub fn new(
        state_machine: OrderStateMachine,
        commission_model: Arc<dyn CommissionModel>,
        catalog: Arc<C>,
        order_repo: Arc<O>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state_machine,
            commission_model,
            catalog,
            order_repo,
            clock,
            lock: Mutex::new(()),
        }
    }

    /// Apply `event` to the order identified by `client_order_id`.
    ///
    /// Fills also yield the commission charged on them. Once the order is
    /// terminal any pending expiry timer for it is canceled.
    ///
    /// # Errors
    ///
    /// Returns `ORDER_NOT_FOUND`, `INVALID_STATE_TRANSITION`, `OVERFILL`,
    /// `INSTRUMENT_NOT_FOUND` or `INVALID_COMMISSION_INPUT`, the last also for
    /// a fill quoted in another currency than its instrument. Nothing is
    /// stored on error.
    pub fn execute(
        &self,
        client_order_id: &ClientOrderId,
        event: OrderEvent,
    ) -> Result<ExecutionReport, ExecutionError> {
        let _guard = self.lock.lock();

        let current = self
            .order_repo
            .find_by_id(client_order_id)?
            .ok_or_else(|| ExecutionError::order_not_found(client_order_id.as_str()))?;

        let next = match self.state_machine.apply(&current, &event) {
            Ok(next) => next,
            Err(e) => {
                let err = ExecutionError::from(e);
                record_order_transition_rejected(err.code().reason());
                tracing::warn!(
                    client_order_id = %client_order_id,
                    status = %current.status(),
                    event = event.name(),
                    error = %err,
                    "Order event rejected"
                );
                return Err(err);
            }
        };

        let commission = match &event {
            OrderEvent::Filled(fill) => Some(self.commission_for(&next, fill)?),
            _ => None,
        };

        self.order_repo.save(&next)?;
        record_order_transition(&next.status().to_string());

        tracing::debug!(
            client_order_id = %client_order_id,
            from = %current.status(),
            to = %next.status(),
            event = event.name(),
            version = next.version(),
            "Order transition applied"
        );

        if let Some(commission) = commission {
            record_commission(
                commission.currency().code(),
                commission.amount().to_f64().unwrap_or_default(),
            );
            tracing::debug!(
                client_order_id = %client_order_id,
                commission = %commission,
                "Commission computed"
            );
        }

        if next.is_terminal() {
            self.clock.cancel_timer(&expiry_timer_name(client_order_id));
        }

        Ok(ExecutionReport {
            order: next,
            commission,
        })
    }

    /// Apply `event` to the order the venue knows as `venue_order_id`.
    ///
    /// # Errors
    ///
    /// Returns `ORDER_NOT_FOUND` if no order was accepted under that id, plus
    /// everything [`Self::execute`] returns.
    pub fn execute_for_venue_order(
        &self,
        venue_order_id: &VenueOrderId,
        event: OrderEvent,
    ) -> Result<ExecutionReport, ExecutionError> {
        let order = self
            .order_repo
            .find_by_venue_id(venue_order_id)?
            .ok_or_else(|| {
                ExecutionError::order_not_found(venue_order_id.as_str())
                    .with_context("venue_order_id", venue_order_id.as_str())
            })?;
        self.execute(order.client_order_id(), event)
    }

    fn commission_for(&self, order: &Order, fill: &Fill) -> Result<Money, ExecutionError> {
        let instrument = self
            .catalog
            .instrument(order.instrument_id())
            .ok_or_else(|| OrderError::InstrumentNotFound {
                instrument_id: order.instrument_id().clone(),
            })?;
        // Notional is always in the instrument's quote currency.
        if fill.quote_currency() != instrument.quote_currency() {
            return Err(OrderError::QuoteCurrencyMismatch {
                instrument_id: instrument.id().clone(),
                expected: instrument.quote_currency(),
                actual: fill.quote_currency(),
            }
            .into());
        }

        Ok(self.commission_model.calculate(
            &instrument,
            fill.quantity(),
            fill.price(),
            fill.exchange_rate(),
            fill.liquidity_side(),
            fill.settlement_currency(),
        )?)
    }
}
