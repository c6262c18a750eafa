//! Detector configuration.

use crate::error::{DetectorError, DetectorResult};
use serde::{Deserialize, Serialize};

/// Configuration for dislocation detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Entry threshold in basis points. A crossing opens on the first
    /// sample at or above this value and closes on the first sample below.
    #[serde(default = "default_threshold_bps")]
    pub threshold_bps: f64,
    /// Minimum duration a crossing must last to be emitted as an event.
    #[serde(default = "default_persistence_ms")]
    pub persistence_ms: i64,
}

fn default_threshold_bps() -> f64 {
    5.0
}

fn default_persistence_ms() -> i64 {
    300
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold_bps: default_threshold_bps(),
            persistence_ms: default_persistence_ms(),
        }
    }
}

impl DetectorConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> DetectorResult<()> {
        if !self.threshold_bps.is_finite() || self.threshold_bps <= 0.0 {
            return Err(DetectorError::Config(format!(
                "threshold_bps ({}) must be finite and positive",
                self.threshold_bps
            )));
        }
        if self.persistence_ms < 0 {
            return Err(DetectorError::Config(format!(
                "persistence_ms ({}) must be non-negative",
                self.persistence_ms
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
        let config = DetectorConfig::default();
        assert_eq!(config.threshold_bps, 5.0);
        assert_eq!(config.persistence_ms, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_threshold() {
        let config = DetectorConfig {
            threshold_bps: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_threshold() {
        let config = DetectorConfig {
            threshold_bps: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_persistence() {
        let config = DetectorConfig {
            persistence_ms: -1,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("non-negative"));
    }
}
