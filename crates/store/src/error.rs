//! Ticket store error types.

use thiserror::Error;

/// Join rule violations for display.
fn format_violations(errors: &[String]) -> String {
    errors.join("; ")
}

/// Ticket store operation errors.
///
/// `NotFound` and `Validation` are expected, recoverable-by-the-caller
/// conditions; `Io` and `Json` mean a durable write or startup load did not
/// complete and are internal faults.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {}", format_violations(.0))]
    Validation(Vec<String>),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
