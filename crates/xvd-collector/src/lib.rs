//! Venue tick collection.
//!
//! Polls public ticker endpoints (Coinbase Exchange, Kraken, Bitstamp) on a
//! fixed interval and writes bid/ask/mid rows to the tick store. One polling
//! cycle stamps every venue with the same wall-clock timestamp; per-venue
//! fetch or parse failures are logged and skipped so one flaky venue never
//! stalls the others.

pub mod client;
pub mod collector;
pub mod config;
pub mod error;

pub use client::VenueClient;
pub use collector::TickCollector;
pub use config::CollectorConfig;
pub use error::{CollectorError, CollectorResult};
