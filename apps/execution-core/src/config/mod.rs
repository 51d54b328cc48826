//! Configuration module for the execution core.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for every component the container wires.
//!
//! # Usage
//!
//! ```rust,ignore
//! use execution_core::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("mode: {}", config.environment.mode);
//! ```

mod clock;
mod commission;
mod environment;
mod identity;
mod instruments;
mod observability;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::order_execution::validate_scope;

pub use clock::ClockConfig;
pub use commission::{CommissionConfig, CommissionModelConfig, MinimumCommissionConfig};
pub use environment::{EnvironmentConfig, EnvironmentMode};
pub use identity::IdentityConfig;
pub use instruments::InstrumentConfig;
pub use observability::{LOG_FORMATS, LoggingConfig, ObservabilityConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Environment configuration.
    #[serde(default)]
    pub environment: EnvironmentConfig,
    /// Trader and strategy identity.
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Clock configuration.
    #[serde(default)]
    pub clock: ClockConfig,
    /// Commission model configuration.
    #[serde(default)]
    pub commission: CommissionConfig,
    /// Instrument catalog.
    #[serde(default)]
    pub instruments: Vec<InstrumentConfig>,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_scope("trader_id", config.identity.trader_id.as_str())
        .map_err(|e| ConfigError::ValidationError(format!("identity: {e}")))?;
    validate_scope("strategy_id", config.identity.strategy_id.as_str())
        .map_err(|e| ConfigError::ValidationError(format!("identity: {e}")))?;

    if config.clock.heartbeat_secs == 0 {
        return Err(ConfigError::ValidationError(
            "clock.heartbeat_secs must be positive".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for instrument in &config.instruments {
        if !seen.insert(&instrument.id) {
            return Err(ConfigError::ValidationError(format!(
                "instruments: duplicate id '{}'",
                instrument.id
            )));
        }
        instrument
            .to_instrument()
            .map_err(|e| ConfigError::ValidationError(format!("instruments.{}: {e}", instrument.id)))?;
    }

    for minimum in &config.commission.minimums {
        if let Some(id) = &minimum.instrument {
            if !seen.contains(id) {
                return Err(ConfigError::ValidationError(format!(
                    "commission.minimums: unknown instrument '{id}'"
                )));
            }
        }
    }
    config
        .commission
        .build()
        .map_err(|e| ConfigError::ValidationError(format!("commission: {e}")))?;

    let format = config.observability.logging.format.as_str();
    if !LOG_FORMATS.contains(&format) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::{Currency, InstrumentId, LiquiditySide, Timestamp};
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.environment.mode, EnvironmentMode::Backtest);
        assert_eq!(config.identity.trader_id.as_str(), "TESTER-000");
        assert_eq!(config.identity.strategy_id.as_str(), "S-001");
        assert_eq!(config.clock.heartbeat_secs, 60);
        assert!(config.instruments.is_empty());
        assert_eq!(config.observability.logging.level, "info");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_empty_config() {
        let config = match load_config_from_string("{}") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert_eq!(config.environment.mode, EnvironmentMode::Backtest);
        assert_eq!(
            config.commission.model,
            CommissionModelConfig::Generic { rate: dec!(0.00002) }
        );
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "mode: ${EXECUTION_CORE_CONFIG_TEST_NONEXISTENT_VAR:-LIVE}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "mode: LIVE");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "trader_id: ${EXECUTION_CORE_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "trader_id: ");
    }

    #[test]
    fn test_validation_invalid_trader_id() {
        let yaml = r"
identity:
  trader_id: TESTER.000
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for dotted trader id");
        };
        assert!(err.to_string().contains("trader_id"));
    }

    #[test]
    fn test_validation_zero_heartbeat() {
        let yaml = r"
clock:
  heartbeat_secs: 0
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero heartbeat");
        };
        assert!(err.to_string().contains("heartbeat_secs"));
    }

    #[test]
    fn test_validation_duplicate_instrument() {
        let yaml = r"
instruments:
  - { id: GBPUSD, quote_currency: USD, price_precision: 5 }
  - { id: GBPUSD, quote_currency: USD, price_precision: 4 }
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for duplicate instrument");
        };
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_validation_precision_too_large() {
        let yaml = r"
instruments:
  - { id: GBPUSD, quote_currency: USD, price_precision: 12 }
";

        assert!(matches!(
            load_config_from_string(yaml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_negative_rate() {
        let yaml = r#"
commission:
  model: GENERIC
  rate: "-0.001"
"#;

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for negative rate");
        };
        assert!(err.to_string().contains("commission"));
    }

    #[test]
    fn test_validation_minimum_for_unknown_instrument() {
        let yaml = r#"
commission:
  model: GENERIC
  minimums:
    - { currency: USD, amount: "2.00", instrument: EURUSD }
"#;

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for unknown instrument");
        };
        assert!(err.to_string().contains("EURUSD"));
    }

    #[test]
    fn test_validation_invalid_log_format() {
        let yaml = r"
observability:
  logging:
    format: xml
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for invalid format");
        };
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_validation_invalid_environment_mode() {
        let yaml = r"
environment:
  mode: PAPER
";

        assert!(matches!(
            load_config_from_string(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
environment:
  mode: LIVE

identity:
  trader_id: TESTER-000
  strategy_id: EMA-CROSS

clock:
  start: "2026-01-19T00:00:00Z"
  heartbeat_secs: 30

commission:
  model: MAKER_TAKER
  maker_rate: "0.00025"
  taker_rate: "0.00075"
  minimums:
    - { currency: USD, amount: "2.00" }
    - { currency: USD, amount: "5.00", instrument: GBP/USD.FXCM }

instruments:
  - { id: GBP/USD.FXCM, quote_currency: USD, price_precision: 5, size_precision: 0 }
  - { id: USD/JPY.FXCM, quote_currency: JPY, price_precision: 3 }

observability:
  logging:
    level: "debug"
    format: "json"
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert_eq!(config.environment.mode, EnvironmentMode::Live);
        assert_eq!(config.identity.strategy_id.as_str(), "EMA-CROSS");
        assert_eq!(
            config.clock.start,
            Some(Timestamp::parse("2026-01-19T00:00:00Z").unwrap())
        );
        assert_eq!(config.clock.heartbeat_secs, 30);
        assert_eq!(config.instruments.len(), 2);
        assert_eq!(config.instruments[1].quote_currency, Currency::JPY);
        assert_eq!(config.instruments[1].size_precision, 0);
        assert_eq!(
            config.commission.minimums[1].instrument,
            Some(InstrumentId::new("GBP/USD.FXCM"))
        );
        assert_eq!(config.observability.logging.format, "json");

        let model = config.commission.build().unwrap();
        assert_eq!(model.rate(LiquiditySide::Maker), dec!(0.00025));
        assert_eq!(model.rate(LiquiditySide::Taker), dec!(0.00075));
    }
}
