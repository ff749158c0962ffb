// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact sizes and size ratios.
//!
//! Sizes are reported in decimal megabytes (1 MB = 1,000,000 bytes).

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::target::BuildTarget;

/// Bytes per reported megabyte.
pub const BYTES_PER_MB: f64 = 1_000_000.0;

/// Size of one built artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactSize {
    pub target: String,
    pub path: PathBuf,
    pub bytes: u64,
    pub megabytes: f64,
}

impl ArtifactSize {
    pub fn new(target: &BuildTarget, path: PathBuf, bytes: u64) -> Self {
        Self {
            target: target.to_string(),
            path,
            bytes,
            megabytes: megabytes(bytes),
        }
    }

    /// Read the size of `target`'s artifact in `dir`.
    ///
    /// A missing artifact is an error; it means the build step did not
    /// produce what it was asked for.
    pub fn read(target: &BuildTarget, dir: &Path) -> Result<Self> {
        let path = target.artifact_path(dir);
        let meta = std::fs::metadata(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("{} is {} bytes", path.display(), meta.len());
        Ok(Self::new(target, path, meta.len()))
    }
}

/// Convert a byte count to megabytes.
pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Format a byte count as megabytes with two decimals (e.g. "2.50 MB").
pub fn human_size(bytes: u64) -> String {
    format!("{:.2} MB", megabytes(bytes))
}

/// Ratio of the reference artifact's size to the primary's.
///
/// An empty primary artifact has no meaningful ratio and is rejected.
pub fn size_ratio(reference: &ArtifactSize, primary: &ArtifactSize) -> Result<f64> {
    if primary.bytes == 0 {
        return Err(Error::EmptyArtifact {
            path: primary.path.clone(),
        });
    }
    Ok(reference.bytes as f64 / primary.bytes as f64)
}

#[cfg(test)]
#[path = "file_size_tests.rs"]
mod tests;
