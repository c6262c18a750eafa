//! Fixed-interval polling loop writing ticks to the store.

use crate::client::VenueClient;
use crate::config::CollectorConfig;
use crate::error::CollectorResult;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use xvd_core::{now_ms, Tick};
use xvd_store::TickStore;

/// How often the running row count is logged.
const PROGRESS_INTERVAL: Duration = Duration::from_secs(10);

/// Polls the configured venues on a fixed interval for a fixed duration.
pub struct TickCollector {
    client: VenueClient,
    venues: Vec<String>,
    interval: Duration,
    duration: Duration,
}

impl TickCollector {
    /// Create a collector from a validated configuration.
    pub fn new(config: &CollectorConfig) -> CollectorResult<Self> {
        config.validate()?;
        for venue in &config.venues {
            if !xvd_core::is_supported(venue) {
                warn!(venue = %venue, "Ignoring unsupported venue");
            }
        }
        Ok(Self {
            client: VenueClient::new(config)?,
            venues: config.enabled_venues(),
            interval: Duration::from_millis(config.interval_ms),
            duration: Duration::from_secs_f64(config.duration_min * 60.0),
        })
    }

    /// Run the polling loop until the configured duration elapses.
    ///
    /// Returns the number of tick rows written. Per-venue failures are
    /// logged and skipped; a cycle writes whatever venues succeeded.
    pub async fn run(&self, store: &mut TickStore) -> CollectorResult<u64> {
        info!(
            venues = ?self.venues,
            interval_ms = self.interval.as_millis() as u64,
            duration_min = self.duration.as_secs_f64() / 60.0,
            "Starting tick collection"
        );

        let deadline = Instant::now() + self.duration;
        let mut rows: u64 = 0;
        let mut last_report = Instant::now();

        while Instant::now() < deadline {
            let batch = self.poll_cycle().await;
            if !batch.is_empty() {
                store.insert_batch(&batch)?;
                rows += batch.len() as u64;
            }

            if last_report.elapsed() >= PROGRESS_INTERVAL {
                last_report = Instant::now();
                info!(rows, "Collected rows so far");
            }

            tokio::time::sleep(self.interval).await;
        }

        info!(rows, "Tick collection finished");
        Ok(rows)
    }

    /// One polling cycle. Every venue in the cycle is stamped with the same
    /// wall-clock timestamp, taken once at cycle start.
    async fn poll_cycle(&self) -> Vec<Tick> {
        let ts_ms = now_ms();
        let mut batch = Vec::with_capacity(self.venues.len());

        for venue in &self.venues {
            match self.client.fetch_quote(venue).await {
                Ok((bid, ask)) => {
                    let tick = Tick::from_quote(ts_ms, venue.as_str(), bid, ask);
                    if tick.is_valid() {
                        batch.push(tick);
                    } else {
                        warn!(venue = %venue, bid, ask, "Discarding invalid quote");
                    }
                }
                Err(e) => {
                    warn!(venue = %venue, error = %e, "Fetch failed; skipping venue this cycle");
                }
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_wires_config() {
        let config = CollectorConfig {
            venues: vec!["kraken".to_string(), "BINANCE".to_string()],
            interval_ms: 250,
            duration_min: 2.0,
            ..Default::default()
        };
        let collector = TickCollector::new(&config).unwrap();
        assert_eq!(collector.venues, vec!["KRAKEN"]);
        assert_eq!(collector.interval, Duration::from_millis(250));
        assert_eq!(collector.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = CollectorConfig {
            venues: vec!["BINANCE".to_string()],
            ..Default::default()
        };
        assert!(TickCollector::new(&config).is_err());
    }
}
