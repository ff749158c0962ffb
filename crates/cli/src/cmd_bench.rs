// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Benchmark command implementation.

use std::time::Duration;

use termcolor::StandardStream;

use adbench::cli::{Cli, OutputFormat};
use adbench::color::resolve_color;
use adbench::config::{self, Config};
use adbench::discovery;
use adbench::driver::{Driver, Reporter};
use adbench::error::ExitCode;
use adbench::exec::SystemExecutor;
use adbench::output::json;
use adbench::output::text::TextFormatter;
use adbench::plan::{Plan, Step};
use adbench::report::SizeReport;

/// Prints timings to stderr and the size report to stdout.
struct ConsoleReporter {
    format: OutputFormat,
    stdout: TextFormatter<StandardStream>,
    stderr: TextFormatter<StandardStream>,
}

impl Reporter for ConsoleReporter {
    fn step_finished(&mut self, step: &Step, elapsed: Duration) -> adbench::Result<()> {
        self.stderr.write_timing(step, elapsed)?;
        Ok(())
    }

    fn sizes(&mut self, report: &SizeReport) -> adbench::Result<()> {
        match self.format {
            OutputFormat::Text => self.stdout.write_report(report)?,
            OutputFormat::Json => json::write_report(std::io::stdout().lock(), report)?,
        }
        Ok(())
    }
}

/// Run the benchmark command.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;

    let config = match discovery::resolve_config(cli.config.as_deref(), &cwd)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load_with_warnings(&path)?
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Config::default()
        }
    };

    let benchmark = cli.benchmark();
    let plan = Plan::new(&config, &benchmark, cli.plan_options());

    let color = resolve_color();

    if cli.dry_run {
        TextFormatter::stdout(color).write_plan(plan.invocations())?;
        return Ok(ExitCode::Success);
    }

    let mut executor =
        SystemExecutor::in_dir(&cwd).stdout_to_stderr(cli.output == OutputFormat::Json);
    let mut reporter = ConsoleReporter {
        format: cli.output,
        stdout: TextFormatter::stdout(color),
        stderr: TextFormatter::stderr(color),
    };

    Driver::new(&mut executor, &mut reporter, config.artifacts.resolve(&cwd))
        .time_builds(config.build.timed)
        .run(&plan, &benchmark)?;

    Ok(ExitCode::Success)
}
