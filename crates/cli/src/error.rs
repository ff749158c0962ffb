// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::plan::Step;

/// adbench error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// External program could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External program exited unsuccessfully.
    #[error("{step} failed: {program} exited with {}", describe_code(.code))]
    CommandFailed {
        step: Step,
        program: String,
        code: Option<i32>,
    },

    /// Writing the report failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    /// Primary artifact is zero bytes, so no size ratio exists.
    #[error("artifact is empty: {}", .path.display())]
    EmptyArtifact { path: PathBuf },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Result type using adbench Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit status.
///
/// A failed external command hands its own exit code back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Run completed
    Success,
    /// Configuration or argument error
    ConfigError,
    /// I/O or internal error
    InternalError,
    /// An external command failed with this code
    Command(i32),
}

impl ExitCode {
    /// Numeric status passed to `std::process::exit`.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => 0,
            ExitCode::ConfigError => 2,
            ExitCode::InternalError => 3,
            ExitCode::Command(code) => code,
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) => ExitCode::ConfigError,
            Error::Io { .. }
            | Error::Spawn { .. }
            | Error::Output(_)
            | Error::EmptyArtifact { .. } => ExitCode::InternalError,
            // Killed by a signal: no code of its own, but still a failure.
            Error::CommandFailed { code, .. } => match code {
                Some(0) | None => ExitCode::Command(1),
                Some(code) => ExitCode::Command(*code),
            },
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
