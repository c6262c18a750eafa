//! Backtest simulation for detected dislocation events.
//!
//! Replays each event against the tick history:
//! - entry/exit shifted by an execution latency
//! - per-venue nearest-timestamp mids via a sorted index ([`PriceIndex`])
//! - gross capture is the event spread; net subtracts a four-action
//!   round-trip cost ([`CostModel`])

pub mod config;
pub mod costs;
pub mod engine;
pub mod error;
pub mod lookup;

pub use config::BacktestConfig;
pub use costs::{CostBreakdown, CostModel, ROUND_TRIP_ACTIONS};
pub use engine::Backtester;
pub use error::{BacktestError, BacktestResult};
pub use lookup::PriceIndex;
