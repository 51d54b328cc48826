//! Order Execution Value Objects

mod fill;
mod order_identity;
mod order_side;
mod order_status;
mod order_type;

pub use fill::Fill;
pub use order_identity::{IdentityError, OrderIdentity, validate_scope};
pub use order_side::OrderSide;
pub use order_status::OrderStatus;
pub use order_type::OrderType;
