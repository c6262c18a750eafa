//! CSV writers for metrics, events, and trades.
//!
//! Writers take fully-computed record sets: a stage finishes its whole
//! output in memory before anything touches disk, so a failed run never
//! leaves a truncated file behind as if it were complete.

use crate::error::ReportResult;
use serde::Serialize;
use std::path::Path;
use tracing::info;
use xvd_core::{DislocationEvent, SpreadSample, Trade};

fn write_rows<T: Serialize>(path: &Path, rows: &[T], kind: &str) -> ReportResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = rows.len(), "Saved {kind}");
    Ok(())
}

/// Write the spread metric stream.
pub fn write_metrics(path: &Path, samples: &[SpreadSample]) -> ReportResult<()> {
    write_rows(path, samples, "metrics")
}

/// Write extracted dislocation events. An empty event set produces an
/// empty file, which the events reader treats as "no events".
pub fn write_events(path: &Path, events: &[DislocationEvent]) -> ReportResult<()> {
    write_rows(path, events, "events")
}

/// Write simulated trades.
pub fn write_trades(path: &Path, trades: &[Trade]) -> ReportResult<()> {
    write_rows(path, trades, "trades")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_metrics_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metrics_last180min.csv");
        let samples = vec![
            SpreadSample {
                ts_ms: 1_000,
                min_venue: "COINBASE".to_string(),
                max_venue: "KRAKEN".to_string(),
                min_mid: 100.0,
                max_mid: 100.25,
                spread_bps: 24.968_789_013_732_834,
            },
            SpreadSample {
                ts_ms: 2_000,
                min_venue: "BITSTAMP".to_string(),
                max_venue: "KRAKEN".to_string(),
                min_mid: 100.1,
                max_mid: 100.2,
                spread_bps: 9.985_022_466_300_548,
            },
        ];
        write_metrics(&path, &samples).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .unwrap();
        let read: Vec<SpreadSample> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(read, samples);
    }

    #[test]
    fn test_events_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events_last180min.csv");
        let events = vec![DislocationEvent {
            start_ms: 0,
            end_ms: 600,
            duration_ms: 600,
            peak_bps: 12.345_678_901_234_567,
            min_venue: "COINBASE".to_string(),
            max_venue: "KRAKEN".to_string(),
        }];
        write_events(&path, &events).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .unwrap();
        let read: Vec<DislocationEvent> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(read, events);
    }

    #[test]
    fn test_trades_round_trip_with_unresolved_mids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trades_last180min.csv");
        let trades = vec![Trade {
            start_ms: 0,
            end_ms: 600,
            duration_ms: 600,
            entry_ts: 100,
            exit_ts: 700,
            long_venue: "COINBASE".to_string(),
            short_venue: "KRAKEN".to_string(),
            long_entry_mid: Some(100.123_456_789),
            short_entry_mid: None,
            long_exit_mid: None,
            short_exit_mid: Some(100.25),
            spread_bps: 24.0,
            pnl_bps: 24.0,
            total_cost_bps: 24.0,
            pnl_net_bps: 0.0,
        }];
        write_trades(&path, &trades).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .unwrap();
        let read: Vec<Trade> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(read, trades);
    }

    #[test]
    fn test_empty_events_write_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events_last180min.csv");
        write_events(&path, &[]).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_writer_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data/processed/metrics_last10min.csv");
        write_metrics(&path, &[]).unwrap();
        assert!(path.exists());
    }
}
