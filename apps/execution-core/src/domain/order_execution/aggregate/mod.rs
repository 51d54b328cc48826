//! Order Aggregate

mod order;

pub use order::{NewOrder, Order, OrderTransition};
