//! `resonance validate` command implementation
//!
//! Checks the metadata file against the ERC-721 metadata convention.

use crate::commands::require_metadata;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::validate::{self, ValidationReport};
use std::path::PathBuf;

/// Validate `file`, or the generated certificate when `None`
pub async fn run(config: &Config, file: Option<PathBuf>) -> Result<ValidationReport> {
    let path = file.unwrap_or_else(|| config.metadata_path());
    require_metadata(&path)?;

    let report = validate::validate_file(&path)?;
    println!("{}", report.render());

    if report.passed() {
        Ok(report)
    } else {
        Err(CliError::ValidationFailed(report.failure_count()))
    }
}
