//! Error types for the Resonance CLI
//!
//! Every variant is user-facing: the message says what went wrong and what to
//! run next. All of them map to exit code 1.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// The metadata file a command depends on does not exist
    #[error("Metadata file not found at '{0}'. Run 'resonance generate' first.")]
    MetadataNotFound(String),

    /// The metadata file is not valid JSON
    #[error("Invalid JSON in '{path}': {message}")]
    InvalidMetadataJson { path: String, message: String },

    /// The metadata parsed but does not satisfy the metadata convention
    #[error("Metadata validation failed with {0} error(s). See the report above.")]
    ValidationFailed(usize),

    /// No configured IPFS endpoint accepted the upload
    #[error("Upload failed on all {0} configured IPFS endpoint(s). Follow the manual upload instructions above.")]
    UploadExhausted(usize),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your config file and environment variables.")]
    Config(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failed
    #[error("Failed to serialize JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// TOML config parsing failed
    #[error("Failed to parse config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Shared file/serialization helpers failed
    #[error(transparent)]
    Common(#[from] resonance_common::ResonanceError),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing metadata error for `path`
    pub fn metadata_not_found(path: &std::path::Path) -> Self {
        Self::MetadataNotFound(path.display().to_string())
    }

    /// Create an invalid JSON error for `path`
    pub fn invalid_json(path: &std::path::Path, message: impl Into<String>) -> Self {
        Self::InvalidMetadataJson {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_metadata_not_found_points_to_generate() {
        let err = CliError::metadata_not_found(Path::new("metadata/cert.json"));
        let msg = err.to_string();
        assert!(msg.contains("metadata/cert.json"));
        assert!(msg.contains("resonance generate"));
    }

    #[test]
    fn test_invalid_json_keeps_parser_message() {
        let err = CliError::invalid_json(Path::new("x.json"), "expected value at line 1 column 1");
        assert!(err.to_string().contains("expected value at line 1 column 1"));
    }
}
