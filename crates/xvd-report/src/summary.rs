//! PnL summary statistics.
//!
//! A describe-style digest of the trade set, logged at the end of a
//! backtest run.

use std::cmp::Ordering;
use tracing::info;
use xvd_core::Trade;

/// Distribution digest of one value series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; zero when fewer than two values.
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl SeriesSummary {
    /// Summarize a value series. `None` for an empty series.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        } else {
            0.0
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        Some(Self {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.50),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }
}

/// Nearest-rank quantile over an already-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let idx = ((sorted.len() - 1) as f64 * q).round() as usize;
    sorted[idx]
}

/// Gross and net PnL digests for a trade set.
#[derive(Debug, Clone)]
pub struct TradeSummary {
    pub pnl_bps: SeriesSummary,
    pub pnl_net_bps: SeriesSummary,
}

impl TradeSummary {
    /// Summarize a trade set. `None` when there are no trades.
    pub fn from_trades(trades: &[Trade]) -> Option<Self> {
        let pnl: Vec<f64> = trades.iter().map(|t| t.pnl_bps).collect();
        let net: Vec<f64> = trades.iter().map(|t| t.pnl_net_bps).collect();
        Some(Self {
            pnl_bps: SeriesSummary::from_values(&pnl)?,
            pnl_net_bps: SeriesSummary::from_values(&net)?,
        })
    }

    /// Output the summary to logs.
    pub fn output_summary(&self) {
        info!("========== Backtest PnL Summary ==========");
        log_series("pnl_bps", &self.pnl_bps);
        log_series("pnl_net_bps", &self.pnl_net_bps);
        info!("==========================================");
    }
}

fn log_series(name: &str, s: &SeriesSummary) {
    info!("--- {} ---", name);
    info!("  count={} mean={:.3} std={:.3}", s.count, s.mean, s.std);
    info!(
        "  min={:.3} q25={:.3} median={:.3} q75={:.3} max={:.3}",
        s.min, s.q25, s.median, s.q75, s.max
    );
}
