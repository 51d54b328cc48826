//! Dependency wiring.

mod container;

pub use container::{ApplyExecutionEvent, Container, CreateOrder, ScheduleExpiry};
