//! IPFS endpoint definitions

use serde::{Deserialize, Serialize};

/// Public read gateways listed after a successful upload.
pub const PUBLIC_GATEWAYS: &[&str] = &[
    "https://ipfs.io/ipfs/",
    "https://gateway.pinata.cloud/ipfs/",
    "https://cloudflare-ipfs.com/ipfs/",
];

/// An IPFS HTTP API endpoint that accepts `add` uploads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpfsEndpoint {
    /// Display name used in reports
    pub name: String,

    /// `/api/v0/add` URL receiving the multipart upload
    pub upload_url: String,

    /// Read gateway prefix; the CID is appended directly
    pub gateway_url: String,
}

impl IpfsEndpoint {
    pub fn new(
        name: impl Into<String>,
        upload_url: impl Into<String>,
        gateway_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            upload_url: upload_url.into(),
            gateway_url: gateway_url.into(),
        }
    }

    /// HTTP URL of `cid` on this endpoint's gateway
    pub fn gateway_link(&self, cid: &str) -> String {
        format!("{}{}", self.gateway_url, cid)
    }
}

/// Local daemon first, then Infura's public API.
pub fn default_endpoints() -> Vec<IpfsEndpoint> {
    vec![
        IpfsEndpoint::new(
            "Local IPFS",
            "http://127.0.0.1:5001/api/v0/add",
            "http://127.0.0.1:8080/ipfs/",
        ),
        IpfsEndpoint::new(
            "Infura IPFS",
            "https://ipfs.infura.io:5001/api/v0/add",
            "https://ipfs.io/ipfs/",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_order() {
        let endpoints = default_endpoints();
        assert_eq!(endpoints[0].name, "Local IPFS");
        assert_eq!(endpoints[1].name, "Infura IPFS");
    }

    #[test]
    fn test_gateway_link_appends_cid() {
        let endpoint = IpfsEndpoint::new("x", "http://a/api/v0/add", "https://ipfs.io/ipfs/");
        assert_eq!(endpoint.gateway_link("Qm123"), "https://ipfs.io/ipfs/Qm123");
    }
}
