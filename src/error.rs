//! Error types for the Polarity library.
//!
//! All fallible operations return [`Result`], whose error is the
//! [`PolarityError`] enum.
//!
//! # Examples
//!
//! ```
//! use polarity::error::{PolarityError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PolarityError::config("epochs must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Polarity operations.
#[derive(Error, Debug)]
pub enum PolarityError {
    /// I/O errors (reading datasets, writing predictions)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed dataset records
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Invalid hyperparameters or experiment settings
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Non-finite values produced during training.
    ///
    /// This always indicates a bug and is never recovered from.
    #[error("Numerical error: {0}")]
    Numerical(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with PolarityError.
pub type Result<T> = std::result::Result<T, PolarityError>;

impl PolarityError {
    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        PolarityError::Dataset(msg.into())
    }

    /// Create a dataset error pointing at a specific line of a file.
    pub fn malformed_record<S: Into<String>>(source: &str, line: usize, msg: S) -> Self {
        PolarityError::Dataset(format!("{source}:{line}: {}", msg.into()))
    }

    /// Create a new invalid config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PolarityError::Config(msg.into())
    }

    /// Create a new numerical error.
    pub fn numerical<S: Into<String>>(msg: S) -> Self {
        PolarityError::Numerical(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PolarityError::Other(msg.into())
    }
}
