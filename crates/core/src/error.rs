//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid priority: {0}")]
    InvalidPriority(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
