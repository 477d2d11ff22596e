//! Resonance Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error type, logging, and file utilities for the Resonance
//! certificate tooling.
//!
//! # Overview
//!
//! - **Error Handling**: [`ResonanceError`] and the [`Result`] alias
//! - **Logging**: `tracing` subscriber setup driven by [`logging::LogConfig`]
//! - **Files**: atomic write-then-rename publishing of output files
//!
//! # Example
//!
//! ```no_run
//! use resonance_common::fs::write_atomic;
//! use std::path::Path;
//!
//! fn save(body: &str) -> resonance_common::Result<()> {
//!     write_atomic(Path::new("metadata/out.json"), body.as_bytes())
//! }
//! ```

pub mod error;
pub mod fs;
pub mod logging;

// Re-export commonly used types
pub use error::{ResonanceError, Result};
