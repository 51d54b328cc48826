//! Shared Domain Types
//!
//! Value objects and errors shared across bounded contexts.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{
    ClientOrderId, Currency, FillId, Instrument, InstrumentId, LiquiditySide, Money, Price, Quantity,
    StrategyId, Timestamp, TraderId, VenueOrderId,
};
