//! Error types for the test harness

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to write an image
    #[error("failed to write image '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// Failed to read back an image
    #[error("failed to read image '{path}': {message}")]
    ImageRead { path: String, message: String },

    /// Synthetic image could not be built
    #[error("failed to build synthetic image: {0}")]
    Synth(#[from] rgbmorph_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
