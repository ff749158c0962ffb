// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Size comparison between the primary and reference artifacts.

use serde::Serialize;

use crate::error::Result;
use crate::file_size::{ArtifactSize, size_ratio};

/// Sizes of the built artifacts and, with a reference, their ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeReport {
    pub primary: ArtifactSize,
    pub reference: Option<ArtifactSize>,
    /// reference bytes / primary bytes
    pub ratio: Option<f64>,
}

impl SizeReport {
    pub fn new(primary: ArtifactSize, reference: Option<ArtifactSize>) -> Result<Self> {
        let ratio = match &reference {
            Some(reference) => Some(size_ratio(reference, &primary)?),
            None => None,
        };
        Ok(Self {
            primary,
            reference,
            ratio,
        })
    }

    /// Artifacts in (reference, primary) order.
    pub fn artifacts(&self) -> impl Iterator<Item = &ArtifactSize> {
        self.reference.iter().chain(std::iter::once(&self.primary))
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
