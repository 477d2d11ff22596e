//! Build automation tasks for Resonance
//!
//! Currently generates the CLI reference from the clap definitions.

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for Resonance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in Markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<resonance_cli::Cli>();

    let content = format!(
        r#"# Resonance CLI Reference

This documentation is auto-generated from the CLI source code. Last updated: {}.

## Overview

`resonance` builds the ERC-721 metadata for the Resonance validation certificate,
publishes it to IPFS, and checks metadata files against the ERC-721 metadata shape.

## Quick Start

```bash
# Build metadata/resonance_validation_certificate.json
resonance generate

# Check the generated file
resonance validate

# Publish it and record the CID in metadata/IPFS_CID.txt
resonance upload
```

## Commands

{}

## Environment Variables

- `RESONANCE_CONFIG` - Path to a TOML config file
- `RESONANCE_METADATA_DIR` - Directory for the metadata and CID files (default: `metadata`)
- `RESONANCE_UPLOAD_TIMEOUT_SECS` - Per-endpoint upload timeout (default: `30`)
- `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_DIR` - Logging overrides
- `RUST_LOG` - Additional tracing filter directives

## Configuration

Example `resonance.toml`:

```toml
metadata_dir = "metadata"
upload_timeout_secs = 30

[certificate]
author = "Hannes Mitterer"

[[endpoints]]
name = "Local IPFS"
upload_url = "http://127.0.0.1:5001/api/v0/add"
gateway_url = "http://127.0.0.1:8080/ipfs/"
```

Endpoints are tried in order; the first successful upload wins.

---

*To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("✅ Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
