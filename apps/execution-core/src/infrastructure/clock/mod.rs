//! Clock adapters.

mod live;
mod simulated;

pub use live::LiveClock;
pub use simulated::SimulatedClock;
