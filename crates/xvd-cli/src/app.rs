//! Pipeline stage orchestration.
//!
//! Each stage opens what it needs and runs to completion: `collect` polls
//! venues into the store, `detect` replays a lookback window into metrics
//! and events CSVs, `backtest` replays the events file against the full
//! tick history into a trades CSV. Stages communicate only through the
//! store and the CSV files, so they can be run separately or chained.

use crate::config::AppConfig;
use crate::error::AppResult;
use std::path::Path;
use tracing::info;
use xvd_backtest::Backtester;
use xvd_collector::TickCollector;
use xvd_detector::DislocationDetector;
use xvd_report::{
    events_path, metrics_path, read_events, trades_path, write_events, write_metrics,
    write_trades, TradeSummary,
};
use xvd_store::TickStore;

/// Pipeline over one validated configuration.
pub struct Application {
    config: AppConfig,
}

impl Application {
    /// Create an application, validating the configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Poll venue tickers into the tick store for the configured duration.
    pub async fn collect(&self) -> AppResult<()> {
        let mut store = TickStore::open(&self.config.store.db_path)?;
        let collector = TickCollector::new(&self.config.collector)?;
        let rows = collector.run(&mut store).await?;
        info!(rows, db_path = %self.config.store.db_path, "Collection complete");
        Ok(())
    }

    /// Detect dislocation events over the lookback window and write the
    /// metrics and events CSVs.
    pub fn detect(&self) -> AppResult<()> {
        let store = TickStore::open(&self.config.store.db_path)?;
        let lookback_min = self.config.report.lookback_min;

        let Some(window_start) = store.lookback_start(lookback_min)? else {
            info!("Tick store is empty; nothing to do");
            return Ok(());
        };
        let ticks = store.ticks_since(Some(window_start))?;
        if ticks.is_empty() {
            info!(lookback_min, "No usable ticks in lookback window; nothing to do");
            return Ok(());
        }

        info!(
            ticks = ticks.len(),
            lookback_min,
            threshold_bps = self.config.detector.threshold_bps,
            persistence_ms = self.config.detector.persistence_ms,
            "Running detection"
        );
        let (metrics, events) = DislocationDetector::run(&ticks, &self.config.detector);

        let out_dir = Path::new(&self.config.report.out_dir);
        write_metrics(&metrics_path(out_dir, lookback_min), &metrics)?;
        write_events(&events_path(out_dir, lookback_min), &events)?;
        Ok(())
    }

    /// Replay the detected events against the tick history and write the
    /// trades CSV plus a PnL summary.
    pub fn backtest(&self) -> AppResult<()> {
        let out_dir = Path::new(&self.config.report.out_dir);
        let lookback_min = self.config.report.lookback_min;

        let events = read_events(&events_path(out_dir, lookback_min))?;
        if events.is_empty() {
            info!("No events to backtest");
            return Ok(());
        }

        // Price lookups use the full tick history, not the lookback
        // window, so latency-shifted timestamps near the window edge
        // still resolve.
        let store = TickStore::open(&self.config.store.db_path)?;
        let ticks = store.ticks_since(None)?;

        let backtester = Backtester::new(&ticks, &self.config.backtest);
        let trades = backtester.run(&events);

        write_trades(&trades_path(out_dir, lookback_min), &trades)?;
        if let Some(summary) = TradeSummary::from_trades(&trades) {
            summary.output_summary();
        }
        Ok(())
    }

    /// Full pipeline: collect (unless skipped), then detect, then backtest.
    pub async fn run(&self, skip_collect: bool) -> AppResult<()> {
        if skip_collect {
            info!("Skipping collection stage");
        } else {
            self.collect().await?;
        }
        self.detect()?;
        self.backtest()?;
        Ok(())
    }
}
