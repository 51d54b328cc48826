//! Liquidity side of a fill.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a fill provided resting liquidity (maker) or removed it (taker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiquiditySide {
    /// Provided liquidity.
    Maker,
    /// Removed liquidity.
    Taker,
}

impl fmt::Display for LiquiditySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maker => write!(f, "MAKER"),
            Self::Taker => write!(f, "TAKER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn liquidity_side_serde() {
        assert_eq!(
            serde_json::to_string(&LiquiditySide::Maker).unwrap(),
            "\"MAKER\""
        );
        let parsed: LiquiditySide = serde_json::from_str("\"TAKER\"").unwrap();
        assert_eq!(parsed, LiquiditySide::Taker);
    }
}
