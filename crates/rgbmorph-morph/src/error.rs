//! Error types for rgbmorph-morph

use thiserror::Error;

/// Errors that can occur during morphological filtering
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rgbmorph_core::Error),

    /// Invalid structuring element, worker count or operation name.
    /// Raised before any work is scheduled.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A worker of the parallel filter failed
    #[error("worker {worker} failed: {message}")]
    WorkerFailure { worker: usize, message: String },
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
