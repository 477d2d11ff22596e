//! Upload strategies
//!
//! [`UploadStrategy`] is the seam the publisher iterates over. The production
//! implementation is [`HttpUploader`], which posts the file to an IPFS HTTP
//! API `add` endpoint.

use crate::error::Result;
use crate::ipfs::endpoint::IpfsEndpoint;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Why a single upload attempt failed.
///
/// These never abort a publish run; the publisher records them and moves on
/// to the next endpoint.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Connection refused - gateway not available")]
    Connection,

    #[error("Timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Response did not include a 'Hash' field")]
    MissingHash,

    #[error("{0}")]
    Request(String),
}

/// One way of getting a file onto IPFS
#[async_trait]
pub trait UploadStrategy: Send + Sync {
    /// Name shown in reports
    fn name(&self) -> &str;

    /// Gateway prefix the CID is appended to for the HTTP link
    fn gateway_url(&self) -> &str;

    /// Upload `contents` as `file_name`, returning the CID
    async fn upload(&self, file_name: &str, contents: Vec<u8>) -> std::result::Result<String, UploadError>;
}

/// Body of a successful `/api/v0/add` call
#[derive(Debug, Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: Option<String>,
}

/// Uploads through the IPFS HTTP API with a fixed timeout
pub struct HttpUploader {
    endpoint: IpfsEndpoint,
    client: Client,
    timeout: Duration,
}

impl HttpUploader {
    pub fn new(endpoint: IpfsEndpoint, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint,
            client,
            timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> UploadError {
        if err.is_timeout() {
            UploadError::Timeout(self.timeout.as_secs())
        } else if err.is_connect() {
            UploadError::Connection
        } else {
            UploadError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl UploadStrategy for HttpUploader {
    fn name(&self) -> &str {
        &self.endpoint.name
    }

    fn gateway_url(&self) -> &str {
        &self.endpoint.gateway_url
    }

    async fn upload(&self, file_name: &str, contents: Vec<u8>) -> std::result::Result<String, UploadError> {
        let part = Part::bytes(contents).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let body: AddResponse = response
            .json()
            .await
            .map_err(|e| UploadError::Decode(e.to_string()))?;

        match body.hash {
            Some(cid) if !cid.is_empty() => Ok(cid),
            _ => Err(UploadError::MissingHash),
        }
    }
}
