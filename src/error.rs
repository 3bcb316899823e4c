use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the catalog at startup.
///
/// Any of these aborts the process; there is no per-row recovery.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed record at row {row}: field `{field}` has value {value:?}")]
    MalformedRecord {
        field: String,
        row: usize,
        value: String,
    },

    #[error("failed to read catalog file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Errors raised while ranking places for a single request
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RankError {
    #[error("invalid time format: {0:?} (expected HH:MM)")]
    InvalidTimeFormat(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
