// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Benchmark driver.
//!
//! Runs a [`Plan`] strictly in order: clean, builds, size report, benchmark.
//! The first failure stops the run; nothing after it executes.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::exec::Executor;
use crate::file_size::ArtifactSize;
use crate::plan::{Benchmark, Plan, Step};
use crate::report::SizeReport;

/// Receives progress and results as the run advances.
pub trait Reporter {
    /// A timed step finished successfully.
    fn step_finished(&mut self, step: &Step, elapsed: Duration) -> Result<()>;

    /// Artifact sizes are known; called before benchmarking starts.
    fn sizes(&mut self, report: &SizeReport) -> Result<()>;
}

/// Drives one benchmark run.
pub struct Driver<'a, E: Executor, R: Reporter> {
    executor: &'a mut E,
    reporter: &'a mut R,
    artifact_dir: PathBuf,
    time_builds: bool,
}

impl<'a, E: Executor, R: Reporter> Driver<'a, E, R> {
    /// `artifact_dir` is where built executables are looked up.
    pub fn new(executor: &'a mut E, reporter: &'a mut R, artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            executor,
            reporter,
            artifact_dir: artifact_dir.into(),
            time_builds: true,
        }
    }

    pub fn time_builds(mut self, enabled: bool) -> Self {
        self.time_builds = enabled;
        self
    }

    /// Execute the plan and return the size report.
    pub fn run(&mut self, plan: &Plan, benchmark: &Benchmark) -> Result<SizeReport> {
        self.executor.execute(&plan.clean)?;

        for build in &plan.builds {
            let start = Instant::now();
            self.executor.execute(build)?;
            if self.time_builds {
                self.reporter.step_finished(&build.step, start.elapsed())?;
            }
        }

        let reference = benchmark
            .reference
            .as_ref()
            .map(|target| ArtifactSize::read(target, &self.artifact_dir))
            .transpose()?;
        let primary = ArtifactSize::read(&benchmark.primary, &self.artifact_dir)?;

        let report = SizeReport::new(primary, reference)?;
        if let Some(ratio) = report.ratio {
            tracing::debug!("size ratio {ratio:.4}");
        }
        self.reporter.sizes(&report)?;

        if let Some(bench) = &plan.bench {
            self.executor.execute(bench)?;
        }

        Ok(report)
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
