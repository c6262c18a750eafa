//! Report error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Events file missing required columns: {0:?}")]
    MissingColumns(Vec<String>),
}

pub type ReportResult<T> = Result<T, ReportError>;
