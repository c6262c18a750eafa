//! Events CSV reader for the backtest stage.

use crate::error::{ReportError, ReportResult};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;
use xvd_core::EventInput;

/// Columns the backtest cannot run without.
pub const REQUIRED_EVENT_COLUMNS: [&str; 4] = ["start_ms", "end_ms", "min_venue", "max_venue"];

/// Read an events file into backtest input rows.
///
/// A missing or empty file is "no events", not an error; a detect run
/// over a quiet window legitimately produces one. A file with headers
/// but without the required columns is a fatal schema violation naming
/// the missing fields. The optional `spread_bps` column is carried when
/// present; all other extra columns are ignored.
pub fn read_events(path: &Path) -> ReportResult<Vec<EventInput>> {
    if !path.exists() {
        info!(path = %path.display(), "No events file, nothing to backtest");
        return Ok(Vec::new());
    }
    if std::fs::metadata(path)?.len() == 0 {
        info!(path = %path.display(), "Events file is empty, nothing to backtest");
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let present: HashSet<&str> = headers.iter().collect();
    let mut missing: Vec<String> = REQUIRED_EVENT_COLUMNS
        .iter()
        .filter(|col| !present.contains(*col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(ReportError::MissingColumns(missing));
    }

    let mut events = Vec::new();
    for result in reader.deserialize::<EventInput>() {
        events.push(result?);
    }
    info!(path = %path.display(), events = events.len(), "Loaded events");
    Ok(events)
}
