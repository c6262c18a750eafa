//! CSV persistence and summaries for dislocation pipeline outputs.
//!
//! Writers persist fully-computed metric/event/trade sets; the events
//! reader validates the schema the backtest depends on; [`TradeSummary`]
//! logs a describe-style PnL digest.

pub mod error;
pub mod paths;
pub mod reader;
pub mod summary;
pub mod writer;

pub use error::{ReportError, ReportResult};
pub use paths::{events_path, metrics_path, trades_path};
pub use reader::{read_events, REQUIRED_EVENT_COLUMNS};
pub use summary::{SeriesSummary, TradeSummary};
pub use writer::{write_events, write_metrics, write_trades};
