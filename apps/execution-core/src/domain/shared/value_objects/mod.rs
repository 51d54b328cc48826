//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod currency;
mod identifiers;
mod instrument;
mod liquidity_side;
mod money;
mod price;
mod quantity;
mod timestamp;

pub use currency::{Currency, MAX_CURRENCY_PRECISION};
pub use identifiers::{ClientOrderId, FillId, InstrumentId, StrategyId, TraderId, VenueOrderId};
pub use instrument::Instrument;
pub use liquidity_side::LiquiditySide;
pub use money::Money;
pub use price::Price;
pub use quantity::Quantity;
pub use timestamp::Timestamp;
