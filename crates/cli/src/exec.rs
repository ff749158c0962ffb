// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External command execution.
//!
//! Commands run in the foreground with inherited stdio so the build tool
//! and benchmarking tool print straight to the terminal. When stdout carries
//! machine-readable output, child stdout is sent to stderr instead.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::error::{Error, Result};
use crate::plan::Step;

/// A single external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub step: Step,
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(step: Step, program: impl Into<String>) -> Self {
        Self {
            step,
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    /// Shell rendering, quoting arguments that need it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

const SHELL_SPECIAL: &[char] = &[
    '"', '\'', '\\', '$', '`', ';', '&', '|', '<', '>', '(', ')', '*', '?', '#', '~', '!',
];

/// Double-quote `arg` when a POSIX shell would split or expand it.
///
/// Inside the quotes `"`, `\`, `$` and `` ` `` are backslash-escaped.
pub fn shell_quote(arg: &str) -> Cow<'_, str> {
    let needs_quotes =
        arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || SHELL_SPECIAL.contains(&c));
    if !needs_quotes {
        return Cow::Borrowed(arg);
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

/// Runs invocations to completion.
///
/// Implementors must block until the command exits and report a non-zero
/// exit as `Error::CommandFailed`.
pub trait Executor {
    fn execute(&mut self, invocation: &Invocation) -> Result<()>;
}

/// Executor backed by `std::process::Command`.
#[derive(Debug, Default)]
pub struct SystemExecutor {
    /// Working directory for spawned commands (inherit when `None`).
    pub cwd: Option<PathBuf>,
    /// Send child stdout to our stderr.
    pub stdout_to_stderr: bool,
}

impl SystemExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
            ..Self::default()
        }
    }

    /// Keep our stdout free for a report that must stay parseable.
    pub fn stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.stdout_to_stderr = enabled;
        self
    }
}

impl Executor for SystemExecutor {
    fn execute(&mut self, invocation: &Invocation) -> Result<()> {
        tracing::debug!("running: {invocation}");

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        if self.stdout_to_stderr {
            command.stdout(std::io::stderr());
        }

        let status = command.status().map_err(|source| Error::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                step: invocation.step.clone(),
                program: invocation.program.clone(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
