// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::Parser;

use crate::plan::{Benchmark, PlanOptions};
use crate::target::BuildTarget;

/// Build, size and benchmark automatic-differentiation executables
#[derive(Parser, Debug)]
#[command(name = "adbench")]
#[command(version, about, long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", env = "ADBENCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Build target to benchmark
    #[arg(short, long, value_name = "TARGET", value_parser = parse_target)]
    pub name: BuildTarget,

    /// Build target to compare against
    #[arg(short, long, value_name = "TARGET", value_parser = parse_target)]
    pub reference: Option<BuildTarget>,

    /// Compare against <NAME>_autodiff
    #[arg(short, long, conflicts_with = "reference")]
    pub paired: bool,

    /// Runtime arguments passed to both executables
    #[arg(short, long, value_name = "ARGS", allow_hyphen_values = true)]
    pub args: Option<String>,

    /// Warm-up runs before measuring (overrides config)
    #[arg(long, value_name = "N")]
    pub warmup: Option<u32>,

    /// Stop after reporting sizes
    #[arg(long)]
    pub no_bench: bool,

    /// Print the commands that would run and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Size report format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

const EXAMPLES: &str = "\
Examples:
  adbench -n backward_adpp                                 Build and benchmark one target
  adbench -n backward_adpp -r backward_autodiff -a \"2.0 4.0\" Compare two targets
  adbench -n backward -p                                   Compare against backward_autodiff";

fn parse_target(s: &str) -> Result<BuildTarget, String> {
    BuildTarget::new(s).map_err(|e| e.to_string())
}

impl Cli {
    /// The benchmark described by the flags.
    pub fn benchmark(&self) -> Benchmark {
        let mut benchmark = Benchmark::new(self.name.clone());
        if let Some(reference) = &self.reference {
            benchmark = benchmark.with_reference(reference.clone());
        } else if self.paired {
            benchmark = benchmark.with_reference(self.name.paired());
        }
        if let Some(args) = &self.args {
            benchmark = benchmark.with_args(args.clone());
        }
        benchmark
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            warmup: self.warmup,
            skip_bench: self.no_bench,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
