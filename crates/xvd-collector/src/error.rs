//! Collector error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Venue payload error: {0}")]
    Payload(String),

    #[error("Store error: {0}")]
    Store(#[from] xvd_store::StoreError),
}

pub type CollectorResult<T> = Result<T, CollectorError>;
