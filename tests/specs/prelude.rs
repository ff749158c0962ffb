//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running adbench against fake build and
//! benchmarking tools inside a temporary project.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::path::Path;
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the adbench binary
pub fn adbench_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("adbench"));
    cmd.env_remove("ADBENCH_CONFIG").env_remove("ADBENCH_LOG");
    cmd
}

// =============================================================================
// Fake tools
// =============================================================================

/// Script name of the fake build tool inside a project.
pub const FAKE_MAKE: &str = "fake-make";
/// Script name of the fake benchmarking tool inside a project.
pub const FAKE_HYPERFINE: &str = "fake-hyperfine";
/// One line per build tool invocation (its arguments, space-joined).
pub const MAKE_LOG: &str = "make.log";
/// One line per argument the benchmarking tool received.
pub const HYPERFINE_LOG: &str = "hyperfine.log";

/// Builder for the fake `make` and `hyperfine` scripts.
///
/// The fake build tool writes a zero-filled artifact of the registered size
/// for each known target and exits with the registered status for failing
/// targets (including `clean`). Unknown targets succeed without output
/// unless `stdout_line` is set.
#[derive(Default)]
pub struct Tools {
    artifacts: Vec<(String, usize)>,
    failures: Vec<(String, i32)>,
    bench_exit: i32,
    stdout_line: Option<String>,
}

impl Tools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifact(mut self, target: &str, bytes: usize) -> Self {
        self.artifacts.push((target.to_string(), bytes));
        self
    }

    pub fn fail(mut self, target: &str, code: i32) -> Self {
        self.failures.push((target.to_string(), code));
        self
    }

    pub fn bench_exit(mut self, code: i32) -> Self {
        self.bench_exit = code;
        self
    }

    /// Have both tools print `line` to stdout, like the real ones do.
    pub fn stdout_line(mut self, line: &str) -> Self {
        self.stdout_line = Some(line.to_string());
        self
    }

    #[cfg(unix)]
    fn install(&self, project: &Project) {
        let log = project.path().join(MAKE_LOG);
        let echo = match &self.stdout_line {
            Some(line) => format!("echo '{line}'\n"),
            None => String::new(),
        };
        let mut cases = String::new();
        for (target, code) in &self.failures {
            cases.push_str(&format!("  {target}) exit {code} ;;\n"));
        }
        for (target, bytes) in &self.artifacts {
            if *bytes == 0 {
                cases.push_str(&format!("  {target}) : > {target} ;;\n"));
            } else {
                cases.push_str(&format!(
                    "  {target}) head -c {bytes} /dev/zero > {target} ;;\n"
                ));
            }
        }
        let make = format!(
            "#!/bin/sh\n{echo}echo \"$*\" >> \"{}\"\ncase \"$1\" in\n{cases}esac\nexit 0\n",
            log.display()
        );
        project.script(FAKE_MAKE, &make);

        let hyperfine = format!(
            "#!/bin/sh\n{echo}for arg in \"$@\"; do echo \"$arg\" >> \"{}\"; done\nexit {}\n",
            project.path().join(HYPERFINE_LOG).display(),
            self.bench_exit
        );
        project.script(FAKE_HYPERFINE, &hyperfine);
    }
}

// =============================================================================
// Project
// =============================================================================

/// Temporary benchmark directory with helper methods.
///
/// # Examples
///
/// ```ignore
/// let temp = Project::with_tools(Tools::new().artifact("backward_adpp", 10));
/// temp.bench(&["-n", "backward_adpp"]).passes();
/// assert_eq!(temp.make_log(), ["clean", "backward_adpp"]);
/// ```
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    /// Create an empty project with no files
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Create a project wired to fake tools through adbench.toml.
    #[cfg(unix)]
    pub fn with_tools(tools: Tools) -> Self {
        let temp = Self::empty();
        tools.install(&temp);
        temp.config(&temp.tools_config());
        temp
    }

    /// `[build]` and `[bench]` sections pointing at the fake tools.
    pub fn tools_config(&self) -> String {
        self.tools_config_with("", "")
    }

    /// Like `tools_config`, with extra lines appended to each section.
    pub fn tools_config_with(&self, build: &str, bench: &str) -> String {
        format!(
            "[build]\nprogram = \"{}\"\n{build}\n[bench]\nprogram = \"{}\"\n{bench}",
            self.path().join(FAKE_MAKE).display(),
            self.path().join(FAKE_HYPERFINE).display()
        )
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write adbench.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        std::fs::write(self.dir.path().join("adbench.toml"), content).unwrap();
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Write an executable script.
    #[cfg(unix)]
    pub fn script(&self, path: &str, content: &str) {
        use std::os::unix::fs::PermissionsExt;

        self.file(path, content);
        let full_path = self.dir.path().join(path);
        let mut perms = std::fs::metadata(&full_path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(full_path, perms).unwrap();
    }

    /// Lines of a log file, empty if the file was never written.
    pub fn log(&self, name: &str) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join(name))
            .map(|s| s.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    pub fn make_log(&self) -> Vec<String> {
        self.log(MAKE_LOG)
    }

    pub fn hyperfine_log(&self) -> Vec<String> {
        self.log(HYPERFINE_LOG)
    }

    /// adbench command running in this project with color disabled.
    pub fn cmd(&self) -> Command {
        let mut cmd = adbench_cmd();
        cmd.current_dir(self.path()).env("NO_COLOR", "1");
        cmd
    }

    /// Builder for an adbench run with the given arguments.
    pub fn bench(&self, args: &[&str]) -> Run {
        let mut cmd = self.cmd();
        cmd.args(args);
        Run { cmd }
    }
}

// =============================================================================
// Run assertions
// =============================================================================

/// A pending adbench invocation.
pub struct Run {
    cmd: Command,
}

impl Run {
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn env_remove(mut self, key: &str) -> Self {
        self.cmd.env_remove(key);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().expect("command should run");
        assert!(
            output.status.success(),
            "expected run to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    pub fn exits(mut self, code: i32) -> RunAssert {
        let output = self.cmd.output().expect("command should run");
        assert_eq!(
            output.status.code(),
            Some(code),
            "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
            code,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Completed run with output assertions.
pub struct RunAssert {
    output: std::process::Output,
}

impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }

    /// Assert stderr does not match predicate.
    pub fn stderr_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            !predicate.into_predicate().eval(&stderr),
            "stderr should NOT match predicate:\n{}",
            stderr
        );
        self
    }
}
