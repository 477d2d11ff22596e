//! `IPFS_CID.txt` sidecar written next to the metadata file

use crate::error::Result;
use crate::ipfs::publisher::UploadResult;
use resonance_common::fs::write_atomic;
use std::path::{Path, PathBuf};

/// File name of the sidecar inside the metadata directory.
pub const CID_FILE_NAME: &str = "IPFS_CID.txt";

/// Sidecar body: CID, IPFS URL, and gateway URL, one per line
pub fn render(result: &UploadResult) -> String {
    format!(
        "CID: {}\nIPFS URL: {}\nHTTP Gateway: {}\n",
        result.cid, result.ipfs_url, result.http_url
    )
}

/// Replace `<dir>/IPFS_CID.txt` with the details of `result`
pub fn write_cid_file(dir: &Path, result: &UploadResult) -> Result<PathBuf> {
    let path = dir.join(CID_FILE_NAME);
    write_atomic(&path, render(result).as_bytes())?;
    Ok(path)
}
