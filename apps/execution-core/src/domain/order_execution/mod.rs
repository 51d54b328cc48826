//! Order Execution Bounded Context
//!
//! Creates uniquely identified orders and tracks them through their
//! lifecycle.
//!
//! # Key Concepts
//!
//! - **Order Identity**: `(trader, strategy, day, sequence)`, rendered as a client order id
//! - **Order Snapshots**: Each applied event yields a new immutable `Order`
//! - **Fills**: Accumulate filled quantity and a volume-weighted average price

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{NewOrder, Order, OrderTransition};
pub use errors::OrderError;
pub use events::OrderEvent;
pub use repository::OrderRepository;
pub use services::{ClientOrderIdGenerator, OrderFactory, OrderStateMachine};
pub use value_objects::{
    Fill, IdentityError, OrderIdentity, OrderSide, OrderStatus, OrderType, validate_scope,
};
