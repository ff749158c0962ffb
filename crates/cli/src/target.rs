// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build target names.
//!
//! A target is both the name the build tool is asked to produce and the
//! file name of the resulting executable.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

/// Suffix appended to a target name to derive its paired reference.
pub const PAIRED_SUFFIX: &str = "_autodiff";

/// A validated build target name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildTarget(String);

impl BuildTarget {
    /// Validate and wrap a target name.
    pub fn new(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::Argument("target name must not be empty".into()));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(Error::Argument(format!(
                "target name must not contain whitespace: {name:?}"
            )));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(Error::Argument(format!(
                "target name must not contain a path separator: {name:?}"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `<name>_autodiff` reference paired with this target.
    pub fn paired(&self) -> Self {
        Self(format!("{}{PAIRED_SUFFIX}", self.0))
    }

    /// Location of the built executable inside `dir`.
    pub fn artifact_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.0)
    }

    /// Shell-style invocation of the executable, relative to the working
    /// directory (e.g. `./backward_adpp`).
    pub fn executable(&self, dir: &Path) -> String {
        if dir.as_os_str().is_empty() || dir == Path::new(".") {
            format!("./{}", self.0)
        } else {
            self.artifact_path(dir).display().to_string()
        }
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BuildTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
