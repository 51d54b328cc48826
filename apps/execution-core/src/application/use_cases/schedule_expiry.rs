//! Schedule Expiry Use Case

use std::sync::Arc;

use crate::application::ports::InstrumentCatalogPort;
use crate::application::use_cases::ApplyExecutionEventUseCase;
use crate::domain::clock::{Clock, TimerSpec};
use crate::domain::order_execution::{OrderEvent, OrderRepository};
use crate::domain::shared::{ClientOrderId, Timestamp};
use crate::error::{ErrorCode, ExecutionError};

/// Name of the expiry timer for an order.
#[must_use]
pub fn expiry_timer_name(client_order_id: &ClientOrderId) -> String {
    format!("expire:{client_order_id}")
}

/// Use case for expiring orders at a point in time.
///
/// Registers a one-shot timer that applies `Expired` to the order. The timer
/// callback has no caller to report to, so failures (typically the order
/// having reached a terminal status first) are logged and dropped.
pub struct ScheduleExpiryUseCase<O, C>
where
    O: OrderRepository + 'static,
    C: InstrumentCatalogPort + 'static,
{
    apply: Arc<ApplyExecutionEventUseCase<O, C>>,
    order_repo: Arc<O>,
    clock: Arc<dyn Clock>,
}

impl<O, C> ScheduleExpiryUseCase<O, C>
where
    O: OrderRepository + 'static,
    C: InstrumentCatalogPort + 'static,
{
    /// Create a new `ScheduleExpiryUseCase`.
    pub const fn new(
        apply: Arc<ApplyExecutionEventUseCase<O, C>>,
        order_repo: Arc<O>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            apply,
            order_repo,
            clock,
        }
    }

    /// Expire the order at `expire_at`.
    ///
    /// # Errors
    ///
    /// Returns `ORDER_NOT_FOUND` for an unknown order, `INVALID_STATE_TRANSITION`
    /// if it is already terminal, or `DUPLICATE_TIMER_NAME` if an expiry is
    /// already scheduled.
    pub fn schedule(
        &self,
        client_order_id: &ClientOrderId,
        expire_at: Timestamp,
    ) -> Result<(), ExecutionError> {
        let order = self
            .order_repo
            .find_by_id(client_order_id)?
            .ok_or_else(|| ExecutionError::order_not_found(client_order_id.as_str()))?;
        if order.is_terminal() {
            return Err(ExecutionError::new(
                ErrorCode::InvalidStateTransition,
                format!("Order {client_order_id} is already {}", order.status()),
            )
            .with_context("client_order_id", client_order_id.as_str()));
        }

        let apply = Arc::clone(&self.apply);
        let id = client_order_id.clone();
        let spec = TimerSpec::once(expiry_timer_name(client_order_id), expire_at, move |event| {
            if let Err(e) = apply.execute(&id, OrderEvent::Expired) {
                tracing::warn!(
                    client_order_id = %id,
                    timer = %event.name,
                    error = %e,
                    "Order expiry dropped"
                );
            }
        });
        self.clock.set_timer(spec)?;

        tracing::debug!(
            client_order_id = %client_order_id,
            expire_at = %expire_at,
            "Order expiry scheduled"
        );
        Ok(())
    }

    /// Cancel a pending expiry. No-op if none is scheduled.
    pub fn cancel(&self, client_order_id: &ClientOrderId) {
        self.clock.cancel_timer(&expiry_timer_name(client_order_id));
    }

    /// Time at which the order is due to expire, if scheduled.
    #[must_use]
    pub fn expires_at(&self, client_order_id: &ClientOrderId) -> Option<Timestamp> {
        self.clock.next_time(&expiry_timer_name(client_order_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::CreateOrderDto;
    use crate::application::ports::InMemoryInstrumentCatalog;
    use crate::application::use_cases::CreateOrderUseCase;
    use crate::domain::commission::GenericCommissionModel;
    use crate::domain::order_execution::{
        ClientOrderIdGenerator, OrderFactory, OrderSide, OrderStateMachine, OrderStatus,
    };
    use crate::domain::shared::{
        Currency, Instrument, InstrumentId, Quantity, StrategyId, TraderId, VenueOrderId,
    };
    use crate::infrastructure::clock::SimulatedClock;
    use crate::infrastructure::persistence::InMemoryOrderRepository;

    type Repo = InMemoryOrderRepository;
    type Catalog = InMemoryInstrumentCatalog;

    struct Fixture {
        clock: Arc<SimulatedClock>,
        repo: Arc<Repo>,
        apply: Arc<ApplyExecutionEventUseCase<Repo, Catalog>>,
        expiry: ScheduleExpiryUseCase<Repo, Catalog>,
        order_id: ClientOrderId,
    }

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn fixture() -> Fixture {
        let clock = Arc::new(SimulatedClock::new(ts("2026-01-19T09:30:00Z")));
        let dyn_clock: Arc<dyn Clock> = clock.clone();
        let factory = Arc::new(
            OrderFactory::new(
                TraderId::new("T1"),
                StrategyId::new("S1"),
                Arc::clone(&dyn_clock),
                Arc::new(ClientOrderIdGenerator::new(Arc::clone(&dyn_clock))),
            )
            .unwrap(),
        );
        let catalog = Arc::new(InMemoryInstrumentCatalog::new([Instrument::new(
            InstrumentId::new("AUDUSD"),
            Currency::USD,
            5,
            0,
        )
        .unwrap()]));
        let repo = Arc::new(InMemoryOrderRepository::new());
        let create = CreateOrderUseCase::new(factory, Arc::clone(&catalog), Arc::clone(&repo));
        let apply = Arc::new(ApplyExecutionEventUseCase::new(
            OrderStateMachine::new(Arc::clone(&dyn_clock)),
            Arc::new(GenericCommissionModel::default()),
            catalog,
            Arc::clone(&repo),
            Arc::clone(&dyn_clock),
        ));

        let order = create
            .execute(&CreateOrderDto::market(
                InstrumentId::new("AUDUSD"),
                OrderSide::Buy,
                Quantity::from_i64(100),
            ))
            .unwrap();
        let order_id = order.client_order_id().clone();
        apply.execute(&order_id, OrderEvent::Submitted).unwrap();
        apply
            .execute(
                &order_id,
                OrderEvent::Accepted {
                    venue_order_id: VenueOrderId::new("V-7"),
                },
            )
            .unwrap();

        Fixture {
            expiry: ScheduleExpiryUseCase::new(Arc::clone(&apply), Arc::clone(&repo), dyn_clock),
            clock,
            repo,
            apply,
            order_id,
        }
    }

    #[test]
    fn timer_name_format() {
        assert_eq!(
            expiry_timer_name(&ClientOrderId::new("O-T1.S1-20260119-000001")),
            "expire:O-T1.S1-20260119-000001"
        );
    }

    #[test]
    fn expires_when_clock_reaches_deadline() {
        let f = fixture();
        let at = ts("2026-01-19T16:00:00Z");
        f.expiry.schedule(&f.order_id, at).unwrap();
        assert_eq!(f.expiry.expires_at(&f.order_id), Some(at));

        f.clock.advance_to(ts("2026-01-19T15:59:59Z")).unwrap();
        let order = f.repo.find_by_id(&f.order_id).unwrap().unwrap();
        assert_eq!(order.status(), OrderStatus::Accepted);

        f.clock.advance_to(at).unwrap();
        let order = f.repo.find_by_id(&f.order_id).unwrap().unwrap();
        assert_eq!(order.status(), OrderStatus::Expired);
        assert_eq!(order.updated_at(), at);
        assert_eq!(f.expiry.expires_at(&f.order_id), None);
    }

    #[test]
    fn canceled_order_removes_timer() {
        let f = fixture();
        f.expiry
            .schedule(&f.order_id, ts("2026-01-19T16:00:00Z"))
            .unwrap();

        f.apply.execute(&f.order_id, OrderEvent::Canceled).unwrap();
        assert_eq!(f.expiry.expires_at(&f.order_id), None);

        f.clock.advance_to(ts("2026-01-19T17:00:00Z")).unwrap();
        let order = f.repo.find_by_id(&f.order_id).unwrap().unwrap();
        assert_eq!(order.status(), OrderStatus::Canceled);
    }

    #[test]
    fn duplicate_schedule_rejected() {
        let f = fixture();
        let at = ts("2026-01-19T16:00:00Z");
        f.expiry.schedule(&f.order_id, at).unwrap();

        let err = f.expiry.schedule(&f.order_id, at).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DuplicateTimerName);

        f.expiry.cancel(&f.order_id);
        assert!(f.expiry.schedule(&f.order_id, at).is_ok());
    }

    #[test]
    fn terminal_order_cannot_be_scheduled() {
        let f = fixture();
        f.apply.execute(&f.order_id, OrderEvent::Canceled).unwrap();

        let err = f
            .expiry
            .schedule(&f.order_id, ts("2026-01-19T16:00:00Z"))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }
}
