//! Error type for the I/O boundary of the crate.
//!
//! The projection engine itself never fails: any well-typed numeric input
//! produces a result. Errors only arise when reading account exports or
//! persisting settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed export row: {0}")]
    MalformedRow(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
