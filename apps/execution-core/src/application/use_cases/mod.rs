//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod apply_execution_event;
mod create_order;
mod schedule_expiry;

pub use apply_execution_event::ApplyExecutionEventUseCase;
pub use create_order::CreateOrderUseCase;
pub use schedule_expiry::{ScheduleExpiryUseCase, expiry_timer_name};
