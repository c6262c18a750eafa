//! Output file naming.
//!
//! Files are suffixed with the lookback window that produced them, so a
//! detect run and the backtest that consumes it agree on which window
//! they are talking about.

use std::path::{Path, PathBuf};

/// `metrics_last{N}min.csv` under `out_dir`.
pub fn metrics_path(out_dir: &Path, lookback_min: i64) -> PathBuf {
    out_dir.join(format!("metrics_last{lookback_min}min.csv"))
}

/// `events_last{N}min.csv` under `out_dir`.
pub fn events_path(out_dir: &Path, lookback_min: i64) -> PathBuf {
    out_dir.join(format!("events_last{lookback_min}min.csv"))
}

/// `trades_last{N}min.csv` under `out_dir`.
pub fn trades_path(out_dir: &Path, lookback_min: i64) -> PathBuf {
    out_dir.join(format!("trades_last{lookback_min}min.csv"))
}
