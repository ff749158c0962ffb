// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run planning.
//!
//! A run is fully described by its invocations before any of them execute:
//! clean, one build per target (reference first), then the benchmark.

use std::fmt;
use std::path::Path;

use crate::config::{BenchConfig, BuildConfig, Config};
use crate::exec::Invocation;
use crate::target::BuildTarget;

/// Stage of a run, used to label invocations and failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Clean,
    Build(String),
    Benchmark,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Clean => f.write_str("clean"),
            Step::Build(target) => write!(f, "build {target}"),
            Step::Benchmark => f.write_str("benchmark"),
        }
    }
}

/// What to build and compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Benchmark {
    pub primary: BuildTarget,
    pub reference: Option<BuildTarget>,
    /// Runtime arguments appended to each command line.
    pub args: Option<String>,
}

impl Benchmark {
    pub fn new(primary: BuildTarget) -> Self {
        Self {
            primary,
            reference: None,
            args: None,
        }
    }

    pub fn with_reference(mut self, reference: BuildTarget) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Blank argument strings are treated as absent.
    pub fn with_args(mut self, args: impl Into<String>) -> Self {
        let args = args.into();
        self.args = if args.trim().is_empty() {
            None
        } else {
            Some(args)
        };
        self
    }

    /// Targets in (reference, primary) order.
    pub fn targets(&self) -> Vec<&BuildTarget> {
        self.reference.iter().chain([&self.primary]).collect()
    }
}

/// Command line handed to the benchmarking tool for one target.
pub fn command_line(target: &BuildTarget, dir: &Path, args: Option<&str>) -> String {
    let executable = target.executable(dir);
    match args {
        Some(args) => format!("{executable} {args}"),
        None => executable,
    }
}

/// Command lines for every target, reference first.
pub fn command_lines(benchmark: &Benchmark, dir: &Path) -> Vec<String> {
    benchmark
        .targets()
        .into_iter()
        .map(|target| command_line(target, dir, benchmark.args.as_deref()))
        .collect()
}

pub fn clean_invocation(build: &BuildConfig) -> Invocation {
    Invocation::new(Step::Clean, &build.program).arg(&build.clean_target)
}

pub fn build_invocation(build: &BuildConfig, target: &BuildTarget) -> Invocation {
    Invocation::new(Step::Build(target.to_string()), &build.program).arg(target.as_str())
}

pub fn bench_invocation(bench: &BenchConfig, warmup: u32, lines: Vec<String>) -> Invocation {
    Invocation::new(Step::Benchmark, &bench.program)
        .arg("--warmup")
        .arg(warmup.to_string())
        .args(bench.extra_args.iter().cloned())
        .args(lines)
}

/// Ordered invocations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub clean: Invocation,
    pub builds: Vec<Invocation>,
    /// `None` when benchmarking is skipped.
    pub bench: Option<Invocation>,
}

/// Per-run overrides of configured values.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    pub warmup: Option<u32>,
    pub skip_bench: bool,
}

impl Plan {
    pub fn new(config: &Config, benchmark: &Benchmark, options: PlanOptions) -> Self {
        let builds = benchmark
            .targets()
            .into_iter()
            .map(|target| build_invocation(&config.build, target))
            .collect();

        let bench = (!options.skip_bench).then(|| {
            bench_invocation(
                &config.bench,
                options.warmup.unwrap_or(config.bench.warmup),
                command_lines(benchmark, &config.artifacts.dir),
            )
        });

        Self {
            clean: clean_invocation(&config.build),
            builds,
            bench,
        }
    }

    /// All invocations in execution order.
    pub fn invocations(&self) -> impl Iterator<Item = &Invocation> {
        std::iter::once(&self.clean)
            .chain(self.builds.iter())
            .chain(self.bench.iter())
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
