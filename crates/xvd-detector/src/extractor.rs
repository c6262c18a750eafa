//! Threshold-crossing state machine over the spread metric stream.
//!
//! Entry is `>=` threshold, exit is strict `<`; an interval's end is the
//! first below-threshold timestamp, not the last above-threshold one. The
//! peak (and the venue pair at the peak) is carried in the state itself,
//! and stream-end flushing is a required transition rather than caller
//! bookkeeping.

use crate::config::DetectorConfig;
use tracing::debug;
use xvd_core::{DislocationEvent, SpreadSample};

/// Extractor state: outside any crossing, or inside one.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractorState {
    /// No crossing in progress.
    Outside,
    /// A crossing opened at `start_ms`; `peak_bps` and `peak_pair` track
    /// the largest spread seen so far and the venue pair holding it.
    Inside {
        start_ms: i64,
        peak_bps: f64,
        peak_pair: (String, String),
    },
}

/// A crossing that just closed, before the persistence filter.
struct ClosedInterval {
    start_ms: i64,
    end_ms: i64,
    peak_bps: f64,
    peak_pair: (String, String),
}

impl ExtractorState {
    /// Apply one metric sample, returning the next state and the interval
    /// closed by this sample, if any.
    fn apply(self, threshold_bps: f64, sample: &SpreadSample) -> (Self, Option<ClosedInterval>) {
        match self {
            Self::Outside => {
                if sample.spread_bps >= threshold_bps {
                    let next = Self::Inside {
                        start_ms: sample.ts_ms,
                        peak_bps: sample.spread_bps,
                        peak_pair: (sample.min_venue.clone(), sample.max_venue.clone()),
                    };
                    (next, None)
                } else {
                    (Self::Outside, None)
                }
            }
            Self::Inside {
                start_ms,
                peak_bps,
                peak_pair,
            } => {
                if sample.spread_bps < threshold_bps {
                    // First below-threshold sample closes the interval at
                    // its own timestamp.
                    let closed = ClosedInterval {
                        start_ms,
                        end_ms: sample.ts_ms,
                        peak_bps,
                        peak_pair,
                    };
                    (Self::Outside, Some(closed))
                } else if sample.spread_bps > peak_bps {
                    // Strict greater-than: the first maximal sample keeps
                    // the peak on ties.
                    let next = Self::Inside {
                        start_ms,
                        peak_bps: sample.spread_bps,
                        peak_pair: (sample.min_venue.clone(), sample.max_venue.clone()),
                    };
                    (next, None)
                } else {
                    let next = Self::Inside {
                        start_ms,
                        peak_bps,
                        peak_pair,
                    };
                    (next, None)
                }
            }
        }
    }

    /// Close an interval still open at end of stream, at `end_ms`.
    fn flush(self, end_ms: i64) -> (Self, Option<ClosedInterval>) {
        match self {
            Self::Outside => (Self::Outside, None),
            Self::Inside {
                start_ms,
                peak_bps,
                peak_pair,
            } => {
                let closed = ClosedInterval {
                    start_ms,
                    end_ms,
                    peak_bps,
                    peak_pair,
                };
                (Self::Outside, Some(closed))
            }
        }
    }
}

/// Extracts dislocation events from a time-ordered spread metric stream.
pub struct EventExtractor {
    threshold_bps: f64,
    persistence_ms: i64,
    state: ExtractorState,
    /// Timestamp of the most recent sample, used to close a dangling
    /// interval in [`EventExtractor::finish`].
    last_ts: Option<i64>,
}

impl EventExtractor {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            threshold_bps: config.threshold_bps,
            persistence_ms: config.persistence_ms,
            state: ExtractorState::Outside,
            last_ts: None,
        }
    }

    /// Feed one metric sample. Returns the event closed by this sample,
    /// if the crossing it ended passed the persistence filter.
    pub fn on_sample(&mut self, sample: &SpreadSample) -> Option<DislocationEvent> {
        self.last_ts = Some(sample.ts_ms);
        let state = std::mem::replace(&mut self.state, ExtractorState::Outside);
        let (next, closed) = state.apply(self.threshold_bps, sample);
        self.state = next;
        closed.and_then(|c| self.filter(c))
    }

    /// Close a crossing still open when the stream ends, using the last
    /// sample's timestamp as the interval end.
    ///
    /// Must be called after the final sample; a dislocation still active
    /// when the data ends would otherwise be lost.
    pub fn finish(&mut self) -> Option<DislocationEvent> {
        let end_ms = self.last_ts?;
        let state = std::mem::replace(&mut self.state, ExtractorState::Outside);
        let (next, closed) = state.flush(end_ms);
        self.state = next;
        closed.and_then(|c| self.filter(c))
    }

    /// Current state, for inspection.
    pub fn state(&self) -> &ExtractorState {
        &self.state
    }

    /// Apply the persistence filter; short intervals are discarded whole.
    fn filter(&self, closed: ClosedInterval) -> Option<DislocationEvent> {
        let duration_ms = closed.end_ms - closed.start_ms;
        if duration_ms < self.persistence_ms {
            debug!(
                start_ms = closed.start_ms,
                duration_ms,
                persistence_ms = self.persistence_ms,
                "Crossing shorter than persistence filter, discarded"
            );
            return None;
        }
        let event = DislocationEvent {
            start_ms: closed.start_ms,
            end_ms: closed.end_ms,
            duration_ms,
            peak_bps: closed.peak_bps,
            min_venue: closed.peak_pair.0,
            max_venue: closed.peak_pair.1,
        };
        debug!(
            start_ms = event.start_ms,
            end_ms = event.end_ms,
            peak_bps = event.peak_bps,
            "Dislocation event"
        );
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(threshold_bps: f64, persistence_ms: i64) -> DetectorConfig {
        DetectorConfig {
            threshold_bps,
            persistence_ms,
        }
    }

    fn sample(ts_ms: i64, spread_bps: f64) -> SpreadSample {
        sample_with_pair(ts_ms, spread_bps, "COINBASE", "KRAKEN")
    }

    fn sample_with_pair(
        ts_ms: i64,
        spread_bps: f64,
        min_venue: &str,
        max_venue: &str,
    ) -> SpreadSample {
        SpreadSample {
            ts_ms,
            min_venue: min_venue.to_string(),
            max_venue: max_venue.to_string(),
            min_mid: 100.0,
            max_mid: 100.0 * (1.0 + spread_bps / 10_000.0),
            spread_bps,
        }
    }

    fn run(
        extractor: &mut EventExtractor,
        samples: &[(i64, f64)],
    ) -> Vec<DislocationEvent> {
        let mut events = Vec::new();
        for (ts, bps) in samples {
            events.extend(extractor.on_sample(&sample(*ts, *bps)));
        }
        events.extend(extractor.finish());
        events
    }

    #[test]
    fn test_threshold_boundary() {
        // Entry is >=, exit is strict <.
        let mut ex = EventExtractor::new(&config(5.0, 0));
        let events = run(&mut ex, &[(0, 4.9), (10, 5.0), (20, 5.1), (30, 4.9)]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_ms, 10);
        assert_eq!(events[0].end_ms, 30);
        assert_eq!(events[0].duration_ms, 20);
    }

    #[test]
    fn test_dangling_interval_is_flushed() {
        let mut ex = EventExtractor::new(&config(5.0, 0));
        let events = run(&mut ex, &[(0, 10.0), (100, 10.0), (200, 10.0)]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_ms, 0);
        assert_eq!(events[0].end_ms, 200);
        assert_eq!(events[0].duration_ms, 200);
    }

    #[test]
    fn test_persistence_filter_discards_short_crossings() {
        let mut ex = EventExtractor::new(&config(5.0, 150));
        // First crossing lasts 100ms, second 200ms.
        let events = run(
            &mut ex,
            &[(0, 10.0), (100, 1.0), (200, 10.0), (400, 1.0)],
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_ms, 200);
        assert_eq!(events[0].duration_ms, 200);
        assert!(events.iter().all(|e| e.duration_ms >= 150));
    }

    #[test]
    fn test_peak_pair_is_pair_at_peak() {
        let mut ex = EventExtractor::new(&config(5.0, 0));
        let mut events = Vec::new();
        events.extend(ex.on_sample(&sample_with_pair(0, 6.0, "BITSTAMP", "KRAKEN")));
        events.extend(ex.on_sample(&sample_with_pair(10, 9.0, "COINBASE", "KRAKEN")));
        // Equal to the running peak: first maximal sample keeps it.
        events.extend(ex.on_sample(&sample_with_pair(20, 9.0, "BITSTAMP", "COINBASE")));
        events.extend(ex.on_sample(&sample_with_pair(30, 1.0, "BITSTAMP", "KRAKEN")));
        events.extend(ex.finish());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].peak_bps, 9.0);
        assert_eq!(events[0].min_venue, "COINBASE");
        assert_eq!(events[0].max_venue, "KRAKEN");
    }

    #[test]
    fn test_no_events_below_threshold() {
        let mut ex = EventExtractor::new(&config(5.0, 0));
        let events = run(&mut ex, &[(0, 1.0), (10, 2.0), (20, 4.99)]);
        assert!(events.is_empty());
        assert_eq!(*ex.state(), ExtractorState::Outside);
    }

    #[test]
    fn test_reentry_produces_separate_events() {
        let mut ex = EventExtractor::new(&config(5.0, 0));
        let events = run(
            &mut ex,
            &[(0, 6.0), (10, 4.0), (20, 6.0), (30, 4.0)],
        );
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].start_ms, 0);
        assert_eq!(events[0].end_ms, 10);
        assert_eq!(events[1].start_ms, 20);
        assert_eq!(events[1].end_ms, 30);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let samples = [(0, 6.0), (100, 8.0), (200, 4.0), (300, 7.0), (400, 2.0)];
        let mut first = EventExtractor::new(&config(5.0, 50));
        let mut second = EventExtractor::new(&config(5.0, 50));
        assert_eq!(run(&mut first, &samples), run(&mut second, &samples));
    }

    #[test]
    fn test_single_sample_flush_respects_persistence() {
        // One inside sample, stream ends immediately: duration 0.
        let mut ex = EventExtractor::new(&config(5.0, 1));
        let events = run(&mut ex, &[(0, 10.0)]);
        assert!(events.is_empty());

        let mut ex = EventExtractor::new(&config(5.0, 0));
        let events = run(&mut ex, &[(0, 10.0)]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].duration_ms, 0);
    }

    #[test]
    fn test_finish_on_empty_stream() {
        let mut ex = EventExtractor::new(&config(5.0, 0));
        assert!(ex.finish().is_none());
    }
}
