//! SQLite-backed tick store.
//!
//! The store is the only durable state in the pipeline: an append-style
//! table of `(ts_ms, venue, bid, ask, mid)` rows written by the collector
//! and replayed in ascending time order by the detection and backtest
//! stages.

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{TickStore, MS_PER_MIN};
