//! Cross-venue dislocation detection.
//!
//! Turns asynchronous per-venue tick streams into a synchronized spread
//! metric and extracts threshold crossings that persist long enough to be
//! genuine dislocations:
//! - as-of merge: latest known mid per venue ([`AsOfMerger`])
//! - spread metric: min/max venue pair in basis points ([`spread_sample`])
//! - event extraction: threshold state machine with a persistence filter
//!   ([`EventExtractor`])

pub mod config;
pub mod detector;
pub mod error;
pub mod extractor;
pub mod merge;
pub mod spread;

pub use config::DetectorConfig;
pub use detector::DislocationDetector;
pub use error::{DetectorError, DetectorResult};
pub use extractor::{EventExtractor, ExtractorState};
pub use merge::{AsOfMerger, MIN_VENUES_FOR_SPREAD};
pub use spread::spread_sample;
