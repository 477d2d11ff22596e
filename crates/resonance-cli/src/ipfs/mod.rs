//! IPFS publishing
//!
//! Uploads the metadata file to an ordered list of IPFS HTTP API endpoints,
//! stopping at the first one that returns a CID.

pub mod endpoint;
pub mod publisher;
pub mod sidecar;
pub mod uploader;

pub use endpoint::{default_endpoints, IpfsEndpoint, PUBLIC_GATEWAYS};
pub use publisher::{EndpointFailure, PublishEvent, PublishReport, Publisher, UploadResult};
pub use uploader::{HttpUploader, UploadError, UploadStrategy};
