//! `resonance upload` command implementation
//!
//! Uploads the metadata file to the first reachable IPFS endpoint and records
//! the CID next to it.

use crate::commands::{require_metadata, rule};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::ipfs::{sidecar, PublishEvent, Publisher, UploadResult, PUBLIC_GATEWAYS};
use crate::progress;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Upload `file`, or the generated certificate when `None`
pub async fn run(config: &Config, file: Option<PathBuf>) -> Result<UploadResult> {
    let path = file.unwrap_or_else(|| config.metadata_path());
    require_metadata(&path)?;

    config.validate_endpoints()?;
    let publisher = Publisher::from_endpoints(&config.endpoints, config.upload_timeout()?)?;

    println!();
    println!("Attempting to upload: {}", path.display());
    println!("{}", rule('='));

    let spinner = progress::create_spinner("Uploading to IPFS...");
    let report = publisher
        .publish_with_progress(&path, |event| spinner.suspend(|| print_event(&event)))
        .await;
    spinner.finish_and_clear();
    let report = report?;

    let Some(result) = report.result else {
        print_manual_instructions(&path);
        return Err(CliError::UploadExhausted(report.failures.len()));
    };

    print_upload_complete(&result);

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let cid_path = sidecar::write_cid_file(dir, &result)?;
    println!("CID information saved to: {}", cid_path.display());
    println!();

    Ok(result)
}

fn print_event(event: &PublishEvent<'_>) {
    match event {
        PublishEvent::Attempting { gateway } => {
            println!();
            println!("Trying {}...", gateway);
        },
        PublishEvent::Failed { reason, .. } => {
            println!("{} Failed: {}", "✗".red(), reason);
        },
        PublishEvent::Published(result) => {
            println!("{} Upload successful!", "✓".green());
            println!();
            println!("CID: {}", result.cid);
            println!("IPFS URL: {}", result.ipfs_url);
            println!("HTTP Gateway URL: {}", result.http_url);
        },
    }
}

fn print_upload_complete(result: &UploadResult) {
    println!();
    println!("{}", rule('='));
    println!("{}", "UPLOAD COMPLETE".green().bold());
    println!("{}", rule('='));
    println!();
    println!("Save these details:");
    println!("CID: {}", result.cid);
    println!("IPFS URL: {}", result.ipfs_url);
    println!("HTTP Gateway: {}", result.http_url);
    println!();
    println!("You can access your metadata at:");
    for gateway in PUBLIC_GATEWAYS {
        println!("  {}{}", gateway, result.cid);
    }
    println!("{}", rule('='));
    println!();
}

fn print_manual_instructions(path: &Path) {
    println!();
    println!("{}", rule('='));
    println!("{}", "MANUAL UPLOAD INSTRUCTIONS".yellow().bold());
    println!("{}", rule('='));
    println!();
    println!("Since automatic upload was not successful, please upload manually:");
    println!();
    println!("Option 1: Using IPFS CLI (if installed)");
    println!("  ipfs add {}", path.display());
    println!();
    println!("Option 2: Using Pinata (https://pinata.cloud)");
    println!("  1. Sign up for a free account");
    println!("  2. Go to 'Upload' section");
    println!("  3. Upload the metadata JSON file");
    println!("  4. Copy the CID provided");
    println!();
    println!("Option 3: Using NFT.Storage (https://nft.storage)");
    println!("  1. Sign up for a free account");
    println!("  2. Go to 'Upload' section");
    println!("  3. Upload the metadata JSON file");
    println!("  4. Copy the CID provided");
    println!();
    println!("Option 4: Using Web3.Storage (https://web3.storage)");
    println!("  1. Sign up for a free account");
    println!("  2. Use their web interface to upload");
    println!("  3. Copy the CID provided");
    println!("{}", rule('='));
    println!();
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ipfs::IpfsEndpoint;
    use crate::metadata::METADATA_FILE_NAME;
    use serde_json::json;
    use serial_test::serial;
    use tempfile::TempDir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn config_for(temp: &TempDir, endpoints: Vec<IpfsEndpoint>) -> Config {
        std::fs::write(temp.path().join(METADATA_FILE_NAME), r#"{"name":"n"}"#).unwrap();
        Config {
            metadata_dir: temp.path().to_path_buf(),
            upload_timeout_secs: 5,
            endpoints,
            ..Config::default()
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_writes_sidecar() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v0/add"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Hash": "QmCert" })))
            .expect(1)
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let config = config_for(
            &temp,
            vec![IpfsEndpoint::new(
                "Mock",
                format!("{}/api/v0/add", server.uri()),
                "https://ipfs.io/ipfs/",
            )],
        );

        let result = run(&config, None).await.unwrap();
        assert_eq!(result.cid, "QmCert");

        let sidecar = std::fs::read_to_string(config.cid_path()).unwrap();
        assert_eq!(
            sidecar,
            "CID: QmCert\nIPFS URL: ipfs://QmCert\nHTTP Gateway: https://ipfs.io/ipfs/QmCert\n"
        );
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_exhaustion_keeps_previous_sidecar() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let config = config_for(
            &temp,
            vec![IpfsEndpoint::new(
                "Mock",
                format!("{}/api/v0/add", server.uri()),
                "https://ipfs.io/ipfs/",
            )],
        );
        std::fs::write(config.cid_path(), "CID: QmPrevious\n").unwrap();

        let result = run(&config, None).await;
        assert!(matches!(result, Err(CliError::UploadExhausted(1))));
        assert_eq!(
            std::fs::read_to_string(config.cid_path()).unwrap(),
            "CID: QmPrevious\n"
        );
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_missing_metadata() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            metadata_dir: temp.path().to_path_buf(),
            ..Config::default()
        };

        let result = run(&config, None).await;
        assert!(matches!(result, Err(CliError::MetadataNotFound(_))));
        assert!(!config.cid_path().exists());
    }
}
