//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Aggregates**: Consistency boundaries with invariants
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless business logic
//! - **Repository Traits**: Persistence abstractions (implemented in adapters)
//!
//! # Bounded Contexts
//!
//! - [`clock`]: Time source and named timers, live or simulated
//! - [`order_execution`]: Order identity, creation and lifecycle
//! - [`commission`]: Fee calculation from fills

pub mod clock;
pub mod commission;
pub mod order_execution;
pub mod shared;
