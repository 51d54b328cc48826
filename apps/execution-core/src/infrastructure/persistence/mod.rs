//! Persistence Adapters
//!
//! Implementations of repository traits.

pub mod in_memory;

pub use in_memory::InMemoryOrderRepository;
