//! Dislocation event records.

use serde::{Deserialize, Serialize};

/// A contiguous interval where the cross-venue spread held at or above the
/// entry threshold long enough to pass the persistence filter.
///
/// `min_venue`/`max_venue` are the pair active **at the peak spread**, which
/// is not necessarily the pair at the start or end of the interval. Events
/// are immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DislocationEvent {
    /// Timestamp of the first at-or-above-threshold sample.
    pub start_ms: i64,
    /// Timestamp of the first below-threshold sample (or the last sample
    /// seen, for an interval still open at end of stream).
    pub end_ms: i64,
    /// `end_ms - start_ms`.
    pub duration_ms: i64,
    /// Largest spread observed inside the interval.
    pub peak_bps: f64,
    /// Cheap venue at the peak.
    pub min_venue: String,
    /// Expensive venue at the peak.
    pub max_venue: String,
}

/// Event row as consumed by the backtest stage.
///
/// Only the four required columns plus the optional carried spread are
/// interpreted; anything else in an events file (duration, peak, counts)
/// is ignored. Events produced by our own extractor carry `peak_bps`
/// rather than `spread_bps`, so self-produced files take the
/// reconstruct-from-entry-mids path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    /// Event start, epoch milliseconds.
    pub start_ms: i64,
    /// Event end, epoch milliseconds.
    pub end_ms: i64,
    /// Cheap venue (the backtest's long leg).
    pub min_venue: String,
    /// Expensive venue (the backtest's short leg).
    pub max_venue: String,
    /// Carried gross spread, if the input provides one.
    #[serde(default)]
    pub spread_bps: Option<f64>,
}

impl From<&DislocationEvent> for EventInput {
    fn from(event: &DislocationEvent) -> Self {
        Self {
            start_ms: event.start_ms,
            end_ms: event.end_ms,
            min_venue: event.min_venue.clone(),
            max_venue: event.max_venue.clone(),
            // Peak is not the entry-time spread; leave it to the backtest
            // to reconstruct from mids, same as reading our own CSV back.
            spread_bps: None,
        }
    }
}
