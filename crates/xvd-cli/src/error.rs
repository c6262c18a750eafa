//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(#[from] xvd_store::StoreError),

    #[error("Detector error: {0}")]
    Detector(#[from] xvd_detector::DetectorError),

    #[error("Backtest error: {0}")]
    Backtest(#[from] xvd_backtest::BacktestError),

    #[error("Report error: {0}")]
    Report(#[from] xvd_report::ReportError),

    #[error("Collector error: {0}")]
    Collector(#[from] xvd_collector::CollectorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
