//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for use case inputs/outputs.

mod order_dto;

pub use order_dto::{CreateOrderDto, ExecutionReport, OrderDto};
