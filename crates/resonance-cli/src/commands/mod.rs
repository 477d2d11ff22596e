//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod generate;
pub mod upload;
pub mod validate;

use crate::error::{CliError, Result};
use std::path::Path;

/// Width of the `=` and `-` rules framing command reports.
pub(crate) const RULE_WIDTH: usize = 60;

pub(crate) fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

/// Fail with a pointer to `resonance generate` when `path` does not exist.
pub(crate) fn require_metadata(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::metadata_not_found(path))
    }
}
