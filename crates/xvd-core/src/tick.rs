//! Tick and spread-metric records.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Basis-point scale factor (1 bps = 1e-4 as a fraction).
pub const BPS_SCALE: f64 = 10_000.0;

/// Current wall-clock time as epoch milliseconds.
///
/// All pipeline timestamps are epoch-millisecond integers; this is the
/// single place the wall clock is read.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// One bid/ask sample from one venue.
///
/// Ticks are immutable once read from the store. The store returns them in
/// ascending `ts_ms` order, so per-venue timestamps are non-decreasing as
/// consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Sample timestamp, epoch milliseconds.
    pub ts_ms: i64,
    /// Venue id (see [`crate::venue`]).
    pub venue: String,
    /// Best bid.
    pub bid: f64,
    /// Best ask.
    pub ask: f64,
    /// Midpoint of bid and ask.
    pub mid: f64,
}

impl Tick {
    /// Create a tick from a quote, deriving `mid = (bid + ask) / 2`.
    pub fn from_quote(ts_ms: i64, venue: impl Into<String>, bid: f64, ask: f64) -> Self {
        Self {
            ts_ms,
            venue: venue.into(),
            bid,
            ask,
            mid: (bid + ask) / 2.0,
        }
    }

    /// Check the tick invariants: finite fields, `bid <= ask`, `mid > 0`.
    ///
    /// Rows failing this are skipped (with a warning) rather than poisoning
    /// downstream spread math with NaN or a crossed quote.
    pub fn is_valid(&self) -> bool {
        self.bid.is_finite()
            && self.ask.is_finite()
            && self.mid.is_finite()
            && self.bid <= self.ask
            && self.mid > 0.0
    }
}

/// Cross-venue spread metric at one instant.
///
/// One sample is produced per incoming tick once at least two venues have
/// reported; the metric stream has the same cardinality as the merged tick
/// stream, never down-sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadSample {
    /// Timestamp of the tick that produced this sample.
    pub ts_ms: i64,
    /// Venue holding the lowest latest-known mid.
    pub min_venue: String,
    /// Venue holding the highest latest-known mid.
    pub max_venue: String,
    /// Lowest latest-known mid.
    pub min_mid: f64,
    /// Highest latest-known mid.
    pub max_mid: f64,
    /// `(max_mid - min_mid) / ((min_mid + max_mid) / 2) * 1e4`.
    pub spread_bps: f64,
}
