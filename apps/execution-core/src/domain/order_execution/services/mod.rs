//! Order Execution Domain Services

mod id_generator;
mod order_factory;
mod order_state_machine;

pub use id_generator::ClientOrderIdGenerator;
pub use order_factory::OrderFactory;
pub use order_state_machine::OrderStateMachine;
