//! Application configuration.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use xvd_backtest::BacktestConfig;
use xvd_collector::CollectorConfig;
use xvd_detector::DetectorConfig;

/// Tick store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file holding the ticks table.
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_db_path() -> String {
    "data/raw/dislocations.sqlite3".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory for the metrics, events, and trades CSV files.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
    /// Detection lookback window over the tick store, in minutes. Also
    /// names the output files (`events_last{N}min.csv`), so the backtest
    /// stage must run with the same value to find them.
    #[serde(default = "default_lookback_min")]
    pub lookback_min: i64,
}

fn default_out_dir() -> String {
    "data/processed".to_string()
}

fn default_lookback_min() -> i64 {
    180
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            lookback_min: default_lookback_min(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tick store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Collector configuration.
    #[serde(default)]
    pub collector: CollectorConfig,
    /// Detector configuration.
    #[serde(default)]
    pub detector: DetectorConfig,
    /// Backtest configuration.
    #[serde(default)]
    pub backtest: BacktestConfig,
    /// Report output configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load(path: &str) -> AppResult<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content).map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Validate all sections.
    pub fn validate(&self) -> AppResult<()> {
        if self.report.lookback_min <= 0 {
            return Err(AppError::Config(format!(
                "lookback_min ({}) must be positive",
                self.report.lookback_min
            )));
        }
        self.collector.validate()?;
        self.detector.validate()?;
        self.backtest.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.db_path, "data/raw/dislocations.sqlite3");
        assert_eq!(config.report.out_dir, "data/processed");
        assert_eq!(config.report.lookback_min, 180);
    }

    #[test]
    fn test_parse_nested_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [store]
            db_path = "/tmp/ticks.sqlite3"

            [detector]
            threshold_bps = 6.0
            persistence_ms = 600

            [backtest]
            latency_ms = 250

            [backtest.costs_bps]
            fee = 2.0
            half_spread = 1.0
            slippage = 3.0

            [report]
            lookback_min = 720
            "#,
        )
        .unwrap();
        assert_eq!(config.store.db_path, "/tmp/ticks.sqlite3");
        assert_eq!(config.detector.threshold_bps, 6.0);
        assert_eq!(config.detector.persistence_ms, 600);
        assert_eq!(config.backtest.latency_ms, 250);
        assert_eq!(config.report.lookback_min, 720);
        // Collector section absent entirely: defaults apply.
        assert_eq!(config.collector.interval_ms, 1_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load("/nonexistent/config.toml").unwrap();
        assert_eq!(config.report.lookback_min, 180);
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();
        let result = AppConfig::from_file(file.path().to_str().unwrap());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse config"));
    }

    #[test]
    fn test_validate_propagates_section_errors() {
        let mut config = AppConfig::default();
        config.report.lookback_min = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.detector.threshold_bps = -1.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.backtest.latency_ms = -5;
        assert!(config.validate().is_err());
    }
}
