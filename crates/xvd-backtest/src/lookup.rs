//! Nearest-timestamp price lookup.

use std::collections::HashMap;
use xvd_core::Tick;

/// One venue's tick history as parallel sorted arrays.
#[derive(Debug, Default)]
struct VenueSeries {
    ts: Vec<i64>,
    mid: Vec<f64>,
}

/// Per-venue sorted index over a tick history, answering "the mid closest
/// in time to `ts`" by binary search.
///
/// Nearest means smallest absolute timestamp difference; on an exact
/// midpoint tie the earlier tick wins. A venue absent from the history
/// yields `None` (unresolved), never zero.
#[derive(Debug, Default)]
pub struct PriceIndex {
    by_venue: HashMap<String, VenueSeries>,
}

impl PriceIndex {
    /// Build the index from ticks in ascending `ts_ms` order.
    pub fn from_ticks(ticks: &[Tick]) -> Self {
        let mut by_venue: HashMap<String, VenueSeries> = HashMap::new();
        for tick in ticks {
            let series = by_venue.entry(tick.venue.clone()).or_default();
            series.ts.push(tick.ts_ms);
            series.mid.push(tick.mid);
        }
        Self { by_venue }
    }

    /// Number of venues with at least one tick.
    pub fn venue_count(&self) -> usize {
        self.by_venue.len()
    }

    /// Mid of the tick nearest in time to `ts_ms` on `venue`.
    pub fn nearest_mid(&self, venue: &str, ts_ms: i64) -> Option<f64> {
        let series = self.by_venue.get(venue)?;
        if series.ts.is_empty() {
            return None;
        }
        // First index with ts >= target; the nearest is that tick or the
        // one just before it.
        let idx = series.ts.partition_point(|&t| t < ts_ms);
        let chosen = if idx == 0 {
            0
        } else if idx == series.ts.len() {
            series.ts.len() - 1
        } else {
            let before = ts_ms - series.ts[idx - 1];
            let after = series.ts[idx] - ts_ms;
            // <= keeps the earlier tick on an exact midpoint tie.
            if before <= after {
                idx - 1
            } else {
                idx
            }
        };
        Some(series.mid[chosen])
    }
}
