//! Simulated trade records.

use serde::{Deserialize, Serialize};

/// The simulated round trip for one dislocation event.
///
/// One record per surviving event: buy the cheap venue (`long_venue`, the
/// event's `min_venue`), sell the expensive venue (`short_venue`, the
/// event's `max_venue`), unwind both legs at event end. Events whose spread
/// cannot be resolved produce no record at all, so trade output can be
/// shorter than event input.
///
/// The four mids are diagnostic: they record what the nearest-tick lookup
/// found (or `None` where a venue had no coverage). They do not feed into
/// `pnl_bps`, which is the full-capture spread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Event start, epoch milliseconds.
    pub start_ms: i64,
    /// Event end, epoch milliseconds.
    pub end_ms: i64,
    /// Event duration.
    pub duration_ms: i64,
    /// `start_ms + latency_ms`: when the entry could actually happen.
    pub entry_ts: i64,
    /// `end_ms + latency_ms`: when the exit could actually happen.
    pub exit_ts: i64,
    /// Venue bought (the event's cheap side).
    pub long_venue: String,
    /// Venue sold (the event's expensive side).
    pub short_venue: String,
    /// Nearest mid on the long venue at `entry_ts`.
    pub long_entry_mid: Option<f64>,
    /// Nearest mid on the short venue at `entry_ts`.
    pub short_entry_mid: Option<f64>,
    /// Nearest mid on the long venue at `exit_ts`.
    pub long_exit_mid: Option<f64>,
    /// Nearest mid on the short venue at `exit_ts`.
    pub short_exit_mid: Option<f64>,
    /// Gross spread: carried from the event input when present, otherwise
    /// reconstructed from the entry mids.
    pub spread_bps: f64,
    /// Gross capture, equal to `spread_bps` (full-capture model).
    pub pnl_bps: f64,
    /// Round-trip cost from the cost model, same for every trade.
    pub total_cost_bps: f64,
    /// `pnl_bps - total_cost_bps`.
    pub pnl_net_bps: f64,
}
