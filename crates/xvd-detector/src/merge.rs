//! As-of merge of asynchronous per-venue tick streams.
//!
//! Each venue samples on its own cadence, so at any instant the freshest
//! information is "the latest tick seen per venue". The merger accumulates
//! exactly that and exposes the whole map after each update.

use std::collections::BTreeMap;
use xvd_core::Tick;

/// Minimum number of venues before a spread is meaningful.
pub const MIN_VENUES_FOR_SPREAD: usize = 2;

/// Latest-known mid per venue, accumulated in tick order.
///
/// The map is owned by the merger and only mutated here, one venue entry
/// per incoming tick. A `BTreeMap` keyed by venue id gives the downstream
/// argmin/argmax scan a fixed lexicographic iteration order, which is what
/// makes tie-breaking reproducible across runs.
#[derive(Debug, Default)]
pub struct AsOfMerger {
    latest: BTreeMap<String, f64>,
}

impl AsOfMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one tick and return the merged view, or `None` while fewer
    /// than [`MIN_VENUES_FOR_SPREAD`] venues have ever reported.
    ///
    /// The view is always the entire current state, not just the changed
    /// venue: a stale venue keeps contributing its last mid until a newer
    /// tick supersedes it.
    pub fn on_tick(&mut self, tick: &Tick) -> Option<&BTreeMap<String, f64>> {
        self.latest.insert(tick.venue.clone(), tick.mid);
        if self.latest.len() >= MIN_VENUES_FOR_SPREAD {
            Some(&self.latest)
        } else {
            None
        }
    }

    /// Number of venues that have reported so far.
    pub fn venues_seen(&self) -> usize {
        self.latest.len()
    }
}
