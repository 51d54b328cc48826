//! Clock configuration.

use serde::{Deserialize, Serialize};

use crate::domain::shared::Timestamp;

/// Clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Start time of the simulated clock. Defaults to midnight UTC today.
    /// Ignored in live mode.
    #[serde(default)]
    pub start: Option<Timestamp>,
    /// Heartbeat timer interval in seconds.
    #[serde(default = "default_heartbeat_secs")]
    pub heartbeat_secs: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start: None,
            heartbeat_secs: default_heartbeat_secs(),
        }
    }
}

const fn default_heartbeat_secs() -> u64 {
    60
}
