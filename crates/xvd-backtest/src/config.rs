//! Backtest configuration.

use crate::error::{BacktestError, BacktestResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for event replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Delay between observing a dislocation and acting on it. Shifts both
    /// the entry and exit lookups forward.
    #[serde(default)]
    pub latency_ms: i64,
    /// Named per-action cost components in basis points. Values are raw
    /// TOML values so a malformed entry degrades to zero instead of
    /// failing config load.
    #[serde(default = "default_costs_bps")]
    pub costs_bps: BTreeMap<String, toml::Value>,
}

fn default_costs_bps() -> BTreeMap<String, toml::Value> {
    BTreeMap::from([
        ("fee_bps".to_string(), toml::Value::Float(2.0)),
        ("half_spread_bps".to_string(), toml::Value::Float(1.0)),
        ("slippage_bps".to_string(), toml::Value::Float(3.0)),
    ])
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            costs_bps: default_costs_bps(),
        }
    }
}

impl BacktestConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> BacktestResult<()> {
        if self.latency_ms < 0 {
            return Err(BacktestError::Config(format!(
                "latency_ms ({}) must be non-negative",
                self.latency_ms
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BacktestConfig::default();
        assert_eq!(config.latency_ms, 0);
        assert_eq!(config.costs_bps.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_latency() {
        let config = BacktestConfig {
            latency_ms: -100,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_mixed_value_types() {
        let config: BacktestConfig = toml::from_str(
            r#"
            latency_ms = 250

            [costs_bps]
            fee_bps = 2
            half_spread_bps = 1.5
            venue_quirk = "not a number"
            "#,
        )
        .unwrap();
        assert_eq!(config.latency_ms, 250);
        assert_eq!(config.costs_bps.len(), 3);
    }
}
