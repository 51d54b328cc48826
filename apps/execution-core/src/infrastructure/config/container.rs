//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components.

use std::sync::Arc;

use crate::application::ports::InMemoryInstrumentCatalog;
use crate::application::use_cases::{
    ApplyExecutionEventUseCase, CreateOrderUseCase, ScheduleExpiryUseCase,
};
use crate::config::{Config, ConfigError};
use crate::domain::clock::Clock;
use crate::domain::commission::CommissionModel;
use crate::domain::order_execution::{ClientOrderIdGenerator, OrderFactory, OrderStateMachine};
use crate::infrastructure::persistence::InMemoryOrderRepository;

/// Use case over the in-memory adapters.
pub type CreateOrder = CreateOrderUseCase<InMemoryOrderRepository, InMemoryInstrumentCatalog>;
/// Use case over the in-memory adapters.
pub type ApplyExecutionEvent =
    ApplyExecutionEventUseCase<InMemoryOrderRepository, InMemoryInstrumentCatalog>;
/// Use case over the in-memory adapters.
pub type ScheduleExpiry = ScheduleExpiryUseCase<InMemoryOrderRepository, InMemoryInstrumentCatalog>;

/// Dependency injection container.
///
/// Holds every wired component for one trader and strategy. All components
/// share the clock passed to [`Container::from_config`].
pub struct Container {
    clock: Arc<dyn Clock>,
    generator: Arc<ClientOrderIdGenerator>,
    commission_model: Arc<dyn CommissionModel>,
    catalog: Arc<InMemoryInstrumentCatalog>,
    order_repo: Arc<InMemoryOrderRepository>,
    create_order: Arc<CreateOrder>,
    apply_event: Arc<ApplyExecutionEvent>,
    schedule_expiry: Arc<ScheduleExpiry>,
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("commission_model", &self.commission_model)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl Container {
    /// Wire every component from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the identity, instruments or commission
    /// settings are rejected by the domain.
    pub fn from_config(config: &Config, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        let instruments = config
            .instruments
            .iter()
            .map(|i| i.to_instrument())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        let catalog = Arc::new(InMemoryInstrumentCatalog::new(instruments));

        let commission_model: Arc<dyn CommissionModel> = Arc::from(
            config
                .commission
                .build()
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?,
        );

        let generator = Arc::new(ClientOrderIdGenerator::new(Arc::clone(&clock)));
        let factory = Arc::new(
            OrderFactory::new(
                config.identity.trader_id.clone(),
                config.identity.strategy_id.clone(),
                Arc::clone(&clock),
                Arc::clone(&generator),
            )
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?,
        );

        let order_repo = Arc::new(InMemoryOrderRepository::new());

        let create_order = Arc::new(CreateOrderUseCase::new(
            factory,
            Arc::clone(&catalog),
            Arc::clone(&order_repo),
        ));
        let apply_event = Arc::new(ApplyExecutionEventUseCase::new(
            OrderStateMachine::new(Arc::clone(&clock)),
            Arc::clone(&commission_model),
            Arc::clone(&catalog),
            Arc::clone(&order_repo),
            Arc::clone(&clock),
        ));
        let schedule_expiry = Arc::new(ScheduleExpiryUseCase::new(
            Arc::clone(&apply_event),
            Arc::clone(&order_repo),
            Arc::clone(&clock),
        ));

        tracing::debug!(
            trader_id = %config.identity.trader_id,
            strategy_id = %config.identity.strategy_id,
            instruments = config.instruments.len(),
            "Container wired"
        );

        Ok(Self {
            clock,
            generator,
            commission_model,
            catalog,
            order_repo,
            create_order,
            apply_event,
            schedule_expiry,
        })
    }

    /// Get the clock.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Get the client order id generator.
    pub fn generator(&self) -> Arc<ClientOrderIdGenerator> {
        Arc::clone(&self.generator)
    }

    /// Get the commission model.
    pub fn commission_model(&self) -> Arc<dyn CommissionModel> {
        Arc::clone(&self.commission_model)
    }

    /// Get the instrument catalog.
    pub fn catalog(&self) -> Arc<InMemoryInstrumentCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Get the order repository.
    pub fn order_repo(&self) -> Arc<InMemoryOrderRepository> {
        Arc::clone(&self.order_repo)
    }

    /// Get the `CreateOrderUseCase`.
    pub fn create_order_use_case(&self) -> Arc<CreateOrder> {
        Arc::clone(&self.create_order)
    }

    /// Get the `ApplyExecutionEventUseCase`.
    pub fn apply_event_use_case(&self) -> Arc<ApplyExecutionEvent> {
        Arc::clone(&self.apply_event)
    }

    /// Get the `ScheduleExpiryUseCase`.
    pub fn schedule_expiry_use_case(&self) -> Arc<ScheduleExpiry> {
        Arc::clone(&self.schedule_expiry)
    }
}
