//! Error types for assignment solving.

use thiserror::Error;

/// Errors that can occur while solving an assignment problem.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The input buffer or shape is unusable: a buffer whose length does not
    /// match `rows * cols`, ragged row data, or a rectangular matrix solved
    /// without opting into padding.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// The square-matrix kernel failed to produce a complete assignment.
    /// Fatal; the orchestration layer has no recovery strategy for this.
    #[error("assignment kernel failed: {0}")]
    KernelFailure(String),
}

/// Result type for assignment operations.
pub type Result<T> = std::result::Result<T, Error>;
