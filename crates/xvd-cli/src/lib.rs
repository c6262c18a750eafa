//! Cross-venue dislocation pipeline.
//!
//! Ties the pipeline crates together behind one configuration and a
//! stage-per-subcommand application:
//! - tick collection from venue ticker APIs into SQLite
//! - dislocation detection over a lookback window
//! - event replay with latency and cost assumptions
//! - CSV reporting and a PnL summary

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use logging::init_logging;
