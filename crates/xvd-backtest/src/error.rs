//! Backtest error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BacktestError {
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type BacktestResult<T> = Result<T, BacktestError>;
