//! Detection pipeline: merge, metric, extraction.

use crate::config::DetectorConfig;
use crate::extractor::EventExtractor;
use crate::merge::AsOfMerger;
use crate::spread::spread_sample;
use tracing::info;
use xvd_core::{DislocationEvent, SpreadSample, Tick};

/// Streaming dislocation detector over a time-ordered tick sequence.
///
/// Each tick flows merge → metric → extractor; ticks must arrive in
/// non-decreasing timestamp order per venue (the store's ascending query
/// guarantees this). [`DislocationDetector::finish`] must be called after
/// the last tick to flush a still-open crossing.
pub struct DislocationDetector {
    merger: AsOfMerger,
    extractor: EventExtractor,
}

impl DislocationDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            merger: AsOfMerger::new(),
            extractor: EventExtractor::new(config),
        }
    }

    /// Feed one tick. Returns the metric sample it produced (once at least
    /// two venues are known) and the event it closed, if any.
    pub fn on_tick(&mut self, tick: &Tick) -> (Option<SpreadSample>, Option<DislocationEvent>) {
        let Some(venues) = self.merger.on_tick(tick) else {
            return (None, None);
        };
        let Some(sample) = spread_sample(tick.ts_ms, venues) else {
            return (None, None);
        };
        let event = self.extractor.on_sample(&sample);
        (Some(sample), event)
    }

    /// Flush the open crossing at end of stream, if one exists.
    pub fn finish(&mut self) -> Option<DislocationEvent> {
        self.extractor.finish()
    }

    /// Batch replay over an already-materialized tick history.
    ///
    /// Returns the full metric stream and the extracted events, both in
    /// time order. An empty tick slice yields empty outputs, not an error.
    pub fn run(
        ticks: &[Tick],
        config: &DetectorConfig,
    ) -> (Vec<SpreadSample>, Vec<DislocationEvent>) {
        let mut detector = Self::new(config);
        let mut samples = Vec::new();
        let mut events = Vec::new();
        for tick in ticks {
            let (sample, event) = detector.on_tick(tick);
            samples.extend(sample);
            events.extend(event);
        }
        events.extend(detector.finish());
        info!(
            ticks = ticks.len(),
            samples = samples.len(),
            events = events.len(),
            threshold_bps = config.threshold_bps,
            persistence_ms = config.persistence_ms,
            "Detection pass complete"
        );
        (samples, events)
    }
}
