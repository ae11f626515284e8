//! Error types for the marching-squares pipeline.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while loading, processing or writing bitmaps.
#[derive(Error, Debug)]
pub enum ContourError {
    /// Invalid configuration: bad arguments, zero workers, zero step,
    /// tile dimensions that disagree with the step size.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required resource (input bitmap, contour tile) is missing or malformed.
    #[error("resource error for {path}: {message}")]
    Resource { path: PathBuf, message: String },

    /// Bitmap data is inconsistent with its declared dimensions.
    #[error("invalid bitmap: {0}")]
    InvalidBitmap(String),

    /// A buffer could not be allocated.
    #[error("unable to allocate {what} ({len} elements)")]
    Allocation { what: &'static str, len: usize },

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    /// Image encoding or decoding error.
    #[error("image error: {0}")]
    Image(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContourError {
    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a Resource error for the given path.
    pub fn resource(path: impl AsRef<Path>, msg: impl Into<String>) -> Self {
        Self::Resource {
            path: path.as_ref().to_path_buf(),
            message: msg.into(),
        }
    }

    /// Create an Allocation error.
    pub fn allocation(what: &'static str, len: usize) -> Self {
        Self::Allocation { what, len }
    }

    /// Whether this error stems from user-supplied configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<serde_yaml::Error> for ContourError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(format!("YAML error: {}", err))
    }
}

/// Result type for marching-squares operations.
pub type Result<T> = std::result::Result<T, ContourError>;
