//! Environment configuration for clock selection.

use serde::{Deserialize, Serialize};

/// Which clock drives the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvironmentMode {
    /// Simulated clock advanced by a backtest driver.
    #[default]
    Backtest,
    /// Wall clock with tokio timers.
    Live,
}

impl std::fmt::Display for EnvironmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backtest => write!(f, "BACKTEST"),
            Self::Live => write!(f, "LIVE"),
        }
    }
}

/// Environment configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Clock mode.
    #[serde(default)]
    pub mode: EnvironmentMode,
}
