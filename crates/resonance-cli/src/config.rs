//! Configuration management for the Resonance CLI
//!
//! Settings come from, in increasing precedence: built-in defaults, an
//! optional TOML file (`--config` / `RESONANCE_CONFIG`), environment
//! variables, and command-line flags.
//!
//! Example file:
//!
//! ```toml
//! metadata_dir = "metadata"
//! upload_timeout_secs = 30
//!
//! [certificate]
//! author = "Hannes Mitterer"
//! protocol = "Peace Protocols v1.1"
//!
//! [[endpoints]]
//! name = "Local IPFS"
//! upload_url = "http://127.0.0.1:5001/api/v0/add"
//! gateway_url = "http://127.0.0.1:8080/ipfs/"
//! ```

use crate::error::{CliError, Result};
use crate::ipfs::sidecar::CID_FILE_NAME;
use crate::ipfs::{default_endpoints, IpfsEndpoint};
use crate::metadata::METADATA_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Directory the metadata file is written to when not configured.
pub const DEFAULT_METADATA_DIR: &str = "metadata";

/// Per-endpoint upload timeout in seconds.
/// Can be overridden via RESONANCE_UPLOAD_TIMEOUT_SECS.
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 30;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the metadata and CID files
    pub metadata_dir: PathBuf,

    /// Timeout applied to each upload attempt
    pub upload_timeout_secs: u64,

    /// Literal values stamped into the certificate
    pub certificate: CertificateConfig,

    /// IPFS endpoints, tried in order
    pub endpoints: Vec<IpfsEndpoint>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metadata_dir: PathBuf::from(DEFAULT_METADATA_DIR),
            upload_timeout_secs: DEFAULT_UPLOAD_TIMEOUT_SECS,
            certificate: CertificateConfig::default(),
            endpoints: default_endpoints(),
        }
    }
}

impl Config {
    /// Load defaults, then the config file if given, then the environment.
    ///
    /// Only settings every command needs are read here. Upload and
    /// certificate settings are checked by the commands that use them.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        Ok(config.merge_env())
    }

    /// Parse a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::config(format!(
                "config file '{}' does not exist",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn merge_env(mut self) -> Self {
        if let Ok(dir) = std::env::var("RESONANCE_METADATA_DIR") {
            self.metadata_dir = PathBuf::from(dir);
        }
        self
    }

    /// Every endpoint needs a name and an upload URL, and there must be one
    pub fn validate_endpoints(&self) -> Result<()> {
        if self.endpoints.is_empty() {
            return Err(CliError::config("at least one IPFS endpoint must be configured"));
        }

        for endpoint in &self.endpoints {
            if endpoint.name.trim().is_empty() || endpoint.upload_url.trim().is_empty() {
                return Err(CliError::config(
                    "every IPFS endpoint needs a name and an upload_url",
                ));
            }
        }

        Ok(())
    }

    /// Per-endpoint upload timeout.
    ///
    /// RESONANCE_UPLOAD_TIMEOUT_SECS overrides the file value.
    pub fn upload_timeout(&self) -> Result<Duration> {
        let secs = match std::env::var("RESONANCE_UPLOAD_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                CliError::config(format!(
                    "RESONANCE_UPLOAD_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            Err(_) => self.upload_timeout_secs,
        };

        if secs == 0 {
            return Err(CliError::config("upload_timeout_secs must be greater than 0"));
        }

        Ok(Duration::from_secs(secs))
    }

    /// Set the metadata directory
    pub fn set_metadata_dir(&mut self, dir: PathBuf) {
        self.metadata_dir = dir;
    }

    /// Path of the certificate metadata file
    pub fn metadata_path(&self) -> PathBuf {
        self.metadata_dir.join(METADATA_FILE_NAME)
    }

    /// Path of the CID sidecar file
    pub fn cid_path(&self) -> PathBuf {
        self.metadata_dir.join(CID_FILE_NAME)
    }
}

/// Literal field values written into the certificate.
///
/// Everything except the build timestamp is taken from here, so the same
/// builder can stamp differently-branded certificates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateConfig {
    pub name: String,
    pub description: String,
    pub image: String,
    pub external_url: String,
    pub author: String,
    pub repository: String,
    pub root_cid: String,
    pub protocol: String,
    pub validation: String,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            name: "Resonance Validation Certificate".to_string(),
            description: "NFT di Validazione Intellettuale per il Repository Resonance AI"
                .to_string(),
            image: "ipfs://QmPlaceholder_ImageCID_ToBeReplaced".to_string(),
            external_url: "ipns://resonance-project".to_string(),
            author: "Hannes Mitterer".to_string(),
            repository: "https://github.com/hannesmitterer/IANI-AI".to_string(),
            root_cid: "QmResonanceHannesMitterer2026...".to_string(),
            protocol: "Peace Protocols v1.1".to_string(),
            validation: "Triple-Signature Anchor".to_string(),
        }
    }
}

impl CertificateConfig {
    /// Reject values that would produce a malformed document
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("name", &self.name), ("description", &self.description)] {
            if value.trim().is_empty() {
                return Err(CliError::config(format!("certificate.{} must not be empty", field)));
            }
        }

        for (field, value) in [("image", &self.image), ("external_url", &self.external_url)] {
            if !is_uri(value) {
                return Err(CliError::config(format!(
                    "certificate.{} must be a URI such as ipfs://<cid>, got '{}'",
                    field, value
                )));
            }
        }

        Ok(())
    }
}

/// `scheme://rest` with an RFC 3986 scheme and a non-empty remainder
fn is_uri(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_alpha
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.trim().is_empty()
}
