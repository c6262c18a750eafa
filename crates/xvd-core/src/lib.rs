//! Core domain types for cross-venue dislocation analysis.
//!
//! This crate provides the fundamental records shared by every stage of the
//! pipeline:
//! - `Tick`: one bid/ask sample from one venue
//! - `SpreadSample`: the cross-venue spread metric at one instant
//! - `DislocationEvent`: a threshold-crossing interval that passed the
//!   persistence filter
//! - `Trade`: the simulated round trip for one event

pub mod event;
pub mod tick;
pub mod trade;
pub mod venue;

pub use event::{DislocationEvent, EventInput};
pub use tick::{now_ms, SpreadSample, Tick, BPS_SCALE};
pub use trade::Trade;
pub use venue::{is_supported, BITSTAMP, COINBASE, KRAKEN, SUPPORTED_VENUES};
