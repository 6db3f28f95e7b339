use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScourError {
    #[error("You must select an operation")]
    NoOperationSelected,

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid cleaner definition: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScourError>;

/// Failure of a backend's path or special-cleanup stream.
///
/// Ends the current phase of the operation that produced it; the run goes on.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("{source} ({})", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message} ({})", .path.display())]
    Database { path: PathBuf, message: String },

    #[error("{0}")]
    Failed(String),
}

/// Failure to clean a single path.
#[derive(Error, Debug)]
pub enum PathError {
    #[error("{0}")]
    Measure(std::io::Error),

    #[error("{0}")]
    Delete(std::io::Error),
}
