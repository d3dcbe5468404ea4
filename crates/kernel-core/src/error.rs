//! Error types for kernel two-sample testing
//!
//! Provides a unified error type for all kernel-stats crates.

use thiserror::Error;

/// Core error type for kernel statistic operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid block split, trial count or other configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Kernel matrix dimensions do not match the block split
    #[error("Shape mismatch: expected a {expected}x{expected} kernel matrix, got {actual}")]
    ShapeMismatch { expected: usize, actual: String },

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an error for a block that is too small for the requested statistic
    pub fn insufficient_block(block: &str, required: usize, actual: usize, statistic: &str) -> Self {
        Self::Configuration(format!(
            "{statistic} requires at least {required} samples in block {block}, got {actual}"
        ))
    }

    /// Create an error for a kernel matrix of the wrong shape
    pub fn shape_mismatch(expected: usize, rows: usize, cols: usize) -> Self {
        Self::ShapeMismatch {
            expected,
            actual: format!("{rows}x{cols}"),
        }
    }
}
