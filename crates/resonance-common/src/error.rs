//! Error types shared across Resonance crates

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for shared operations
pub type Result<T> = std::result::Result<T, ResonanceError>;

/// Low-level error type for file output
#[derive(Error, Debug)]
pub enum ResonanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to publish '{path}': {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
