// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Execution Core - Rust Core Library
//!
//! Deterministic order identity, time, lifecycle and commission core for a
//! trading system.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, domain events)
//!   - `clock`: `Clock` port, timer specs and time events
//!   - `order_execution`: Order snapshots, lifecycle state machine, client order ids
//!   - `commission`: Generic and maker/taker commission models
//!   - `shared`: Money, prices, quantities, instruments, identifiers
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `InstrumentCatalogPort`
//!   - `use_cases`: `CreateOrder`, `ApplyExecutionEvent`, `ScheduleExpiry`
//!   - `dto`: Data transfer objects for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `clock`: Live (tokio) and simulated clocks
//!   - `persistence`: Order snapshot repository (in-memory)
//!   - `config`: Dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Structured errors at the application boundary.
pub mod error;

/// Metrics recording.
pub mod observability;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::clock::{Clock, ClockError, TimeEvent, TimerSpec};
pub use domain::commission::{
    CommissionError, CommissionModel, GenericCommissionModel, MakerTakerCommissionModel,
    MinimumCommissions,
};
pub use domain::order_execution::{
    ClientOrderIdGenerator, Fill, Order, OrderError, OrderEvent, OrderFactory, OrderIdentity,
    OrderRepository, OrderSide, OrderStateMachine, OrderStatus, OrderType,
};
pub use domain::shared::{
    ClientOrderId, Currency, Instrument, InstrumentId, LiquiditySide, Money, Price, Quantity,
    StrategyId, Timestamp, TraderId, VenueOrderId,
};

// Application re-exports
pub use application::dto::{CreateOrderDto, ExecutionReport, OrderDto};
pub use application::ports::{InMemoryInstrumentCatalog, InstrumentCatalogPort};
pub use application::use_cases::{
    ApplyExecutionEventUseCase, CreateOrderUseCase, ScheduleExpiryUseCase,
};

// Infrastructure re-exports
pub use error::{ErrorCode, ExecutionError};
pub use infrastructure::clock::{LiveClock, SimulatedClock};
pub use infrastructure::config::Container;
pub use infrastructure::persistence::InMemoryOrderRepository;
