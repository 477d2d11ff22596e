//! Sequential, first-success-wins publishing

use crate::error::{CliError, Result};
use crate::ipfs::endpoint::IpfsEndpoint;
use crate::ipfs::uploader::{HttpUploader, UploadError, UploadStrategy};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// A successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    pub success: bool,
    pub cid: String,
    pub gateway_name: String,
    pub ipfs_url: String,
    pub http_url: String,
}

impl UploadResult {
    pub fn new(cid: impl Into<String>, gateway_name: impl Into<String>, gateway_url: &str) -> Self {
        let cid = cid.into();
        Self {
            success: true,
            ipfs_url: format!("ipfs://{}", cid),
            http_url: format!("{}{}", gateway_url, cid),
            gateway_name: gateway_name.into(),
            cid,
        }
    }
}

/// An endpoint that was tried and failed
#[derive(Debug)]
pub struct EndpointFailure {
    pub gateway_name: String,
    pub reason: UploadError,
}

/// Outcome of one publish run.
///
/// `failures` lists every endpoint tried before the run ended, in order.
/// `result` is `None` when all endpoints failed.
#[derive(Debug)]
pub struct PublishReport {
    pub failures: Vec<EndpointFailure>,
    pub result: Option<UploadResult>,
}

impl PublishReport {
    pub fn is_published(&self) -> bool {
        self.result.is_some()
    }
}

/// Progress of a publish run, reported as it happens
#[derive(Debug)]
pub enum PublishEvent<'a> {
    /// About to upload to `gateway`
    Attempting { gateway: &'a str },
    Failed { gateway: &'a str, reason: &'a UploadError },
    Published(&'a UploadResult),
}

/// Tries each strategy in order until one returns a CID
pub struct Publisher {
    strategies: Vec<Box<dyn UploadStrategy>>,
}

impl Publisher {
    pub fn new(strategies: Vec<Box<dyn UploadStrategy>>) -> Self {
        Self { strategies }
    }

    /// One [`HttpUploader`] per endpoint, in the given order
    pub fn from_endpoints(endpoints: &[IpfsEndpoint], timeout: Duration) -> Result<Self> {
        let strategies = endpoints
            .iter()
            .cloned()
            .map(|endpoint| {
                HttpUploader::new(endpoint, timeout).map(|u| Box::new(u) as Box<dyn UploadStrategy>)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(strategies))
    }

    /// Upload the file at `path` without progress reporting.
    pub async fn publish(&self, path: &Path) -> Result<PublishReport> {
        self.publish_with_progress(path, |_| {}).await
    }

    /// Upload the file at `path`, calling `on_event` before and after each
    /// attempt.
    ///
    /// Errors only when the file is missing or unreadable; endpoint failures
    /// are collected in the report. Each endpoint gets exactly one attempt and
    /// nothing after the first success is contacted.
    pub async fn publish_with_progress<F>(&self, path: &Path, mut on_event: F) -> Result<PublishReport>
    where
        F: FnMut(PublishEvent<'_>),
    {
        if !path.exists() {
            return Err(CliError::metadata_not_found(path));
        }

        let contents = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "metadata.json".to_string());

        let mut failures = Vec::new();

        for strategy in &self.strategies {
            info!(gateway = strategy.name(), file = %file_name, "Attempting upload");
            on_event(PublishEvent::Attempting {
                gateway: strategy.name(),
            });

            match strategy.upload(&file_name, contents.clone()).await {
                Ok(cid) => {
                    info!(gateway = strategy.name(), cid = %cid, "Upload succeeded");
                    let result = UploadResult::new(cid, strategy.name(), strategy.gateway_url());
                    on_event(PublishEvent::Published(&result));
                    return Ok(PublishReport {
                        failures,
                        result: Some(result),
                    });
                },
                Err(reason) => {
                    warn!(gateway = strategy.name(), error = %reason, "Upload failed");
                    on_event(PublishEvent::Failed {
                        gateway: strategy.name(),
                        reason: &reason,
                    });
                    failures.push(EndpointFailure {
                        gateway_name: strategy.name().to_string(),
                        reason,
                    });
                },
            }
        }

        Ok(PublishReport {
            failures,
            result: None,
        })
    }
}
