//! Resonance CLI Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Builds, publishes, and validates the ERC-721 metadata document of the
//! Resonance Validation Certificate.
//!
//! # Overview
//!
//! Three independent steps, communicating only through the metadata file:
//!
//! - **Generate**: build the document and write it to
//!   `metadata/resonance_validation_certificate.json` (`resonance generate`)
//! - **Upload**: push the file to the first reachable IPFS endpoint and record
//!   the CID in `metadata/IPFS_CID.txt` (`resonance upload`)
//! - **Validate**: check the file against the ERC-721 metadata convention
//!   (`resonance validate`)

pub mod commands;
pub mod config;
pub mod error;
pub mod ipfs;
pub mod metadata;
pub mod progress;
pub mod validate;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, Result};
pub use metadata::Document;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Resonance - certificate metadata toolkit
#[derive(Parser, Debug)]
#[command(name = "resonance")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, env = "RESONANCE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the metadata and CID files
    #[arg(long, env = "RESONANCE_METADATA_DIR", global = true)]
    pub metadata_dir: Option<PathBuf>,

    /// Print the CLI reference as Markdown and exit
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the certificate metadata and write it to the metadata directory
    Generate,

    /// Upload the metadata file to IPFS
    Upload {
        /// Metadata file to upload (defaults to the generated certificate)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Check the metadata file against the ERC-721 metadata convention
    Validate {
        /// Metadata file to validate (defaults to the generated certificate)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
