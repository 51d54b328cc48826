//! Trader and strategy identity used to scope client order ids.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{StrategyId, TraderId};

/// Identity configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Trader placing orders.
    #[serde(default = "default_trader_id")]
    pub trader_id: TraderId,
    /// Strategy originating orders.
    #[serde(default = "default_strategy_id")]
    pub strategy_id: StrategyId,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            trader_id: default_trader_id(),
            strategy_id: default_strategy_id(),
        }
    }
}

fn default_trader_id() -> TraderId {
    TraderId::new("TESTER-000")
}

fn default_strategy_id() -> StrategyId {
    StrategyId::new("S-001")
}
