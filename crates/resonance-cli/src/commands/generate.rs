//! `resonance generate` command implementation
//!
//! Builds the certificate metadata and writes it to the metadata directory.

use crate::commands::rule;
use crate::config::Config;
use crate::error::Result;
use crate::metadata::{self, Document};
use chrono::{Local, TimeZone};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Build and persist the certificate metadata
pub async fn run(config: &Config) -> Result<PathBuf> {
    config.certificate.validate()?;

    let timestamp = metadata::current_timestamp();
    let document = metadata::build(&config.certificate, timestamp);

    let path = metadata::persist(&document, &config.metadata_dir)?;
    info!(path = %path.display(), timestamp, "Generated certificate metadata");

    print_summary(&document, &path, timestamp)?;

    Ok(path)
}

/// Local wall-clock rendering of `timestamp`, e.g. `2026-01-01T01:00:00`
pub fn format_local_iso(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

fn print_summary(document: &Document, path: &Path, timestamp: i64) -> Result<()> {
    // Same serializer as `persist`, so this matches the file byte for byte.
    let json = document.to_json()?;

    println!();
    println!("{}", rule('='));
    println!("{}", "ERC-721 METADATA GENERATED SUCCESSFULLY".green().bold());
    println!("{}", rule('='));
    println!();
    println!("File Location: {}", path.display());
    println!("Timestamp (Epoch): {}", timestamp);
    println!("Timestamp (Human): {}", format_local_iso(timestamp));
    println!();
    println!("Metadata Content:");
    println!("{}", rule('-'));
    println!("{}", json);
    println!("{}", rule('-'));
    println!();
    println!("{}", "Next Steps:".cyan().bold());
    println!("1. Review the metadata file");
    println!("2. Upload the metadata JSON to IPFS (resonance upload)");
    println!("3. Note the CID returned by IPFS");
    println!("4. Update the 'image' field with actual image CID when available");
    println!("5. Update the 'Root CID' attribute with actual repository CID");
    println!();
    println!("IPFS Upload Commands:");
    println!("  ipfs add {}", path.display());
    println!("  OR use a pinning service like Pinata, NFT.Storage, or Web3.Storage");
    println!("{}", rule('='));
    println!();

    Ok(())
}
