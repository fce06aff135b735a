//! Error types for BookVoyage.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A required table or column is absent. Blocking: nothing is rendered.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// A filter pass could not be evaluated. The whole pass is discarded.
    #[error("Filter evaluation failed: {0}")]
    FilterEvaluation(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
