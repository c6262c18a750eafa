//! Collector configuration.

use crate::error::{CollectorError, CollectorResult};
use serde::{Deserialize, Serialize};
use xvd_core::{is_supported, SUPPORTED_VENUES};

/// Configuration for the polling collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Venues to poll each cycle. Entries outside the supported set are
    /// ignored with a warning at startup.
    #[serde(default = "default_venues")]
    pub venues: Vec<String>,
    /// Coinbase Exchange product id.
    #[serde(default = "default_coinbase_product")]
    pub coinbase_product: String,
    /// Bitstamp currency pair.
    #[serde(default = "default_bitstamp_pair")]
    pub bitstamp_pair: String,
    /// Kraken pair code.
    #[serde(default = "default_kraken_pair")]
    pub kraken_pair: String,
    /// How long to collect, in minutes.
    #[serde(default = "default_duration_min")]
    pub duration_min: f64,
    /// Polling cycle interval, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_venues() -> Vec<String> {
    SUPPORTED_VENUES.iter().map(|v| v.to_string()).collect()
}

fn default_coinbase_product() -> String {
    "BTC-USD".to_string()
}

fn default_bitstamp_pair() -> String {
    "btcusd".to_string()
}

fn default_kraken_pair() -> String {
    "XBTUSD".to_string()
}

fn default_duration_min() -> f64 {
    15.0
}

fn default_interval_ms() -> u64 {
    1_000
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            venues: default_venues(),
            coinbase_product: default_coinbase_product(),
            bitstamp_pair: default_bitstamp_pair(),
            kraken_pair: default_kraken_pair(),
            duration_min: default_duration_min(),
            interval_ms: default_interval_ms(),
        }
    }
}

impl CollectorConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> CollectorResult<()> {
        if !self.duration_min.is_finite() || self.duration_min <= 0.0 {
            return Err(CollectorError::Config(format!(
                "duration_min ({}) must be finite and positive",
                self.duration_min
            )));
        }
        if self.interval_ms == 0 {
            return Err(CollectorError::Config(
                "interval_ms must be positive".to_string(),
            ));
        }
        if self.enabled_venues().is_empty() {
            return Err(CollectorError::Config(format!(
                "No supported venues enabled. Supported: {}",
                SUPPORTED_VENUES.join(", ")
            )));
        }
        Ok(())
    }

    /// Configured venues, uppercased and filtered to the supported set,
    /// in configured order.
    pub fn enabled_venues(&self) -> Vec<String> {
        self.venues
            .iter()
            .map(|v| v.to_ascii_uppercase())
            .filter(|v| is_supported(v))
            .collect()
    }
}
