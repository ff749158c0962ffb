// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! adbench CLI entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use adbench::cli::Cli;
use adbench::error::ExitCode;

mod cmd_bench;

fn init_logging() {
    let filter = EnvFilter::try_from_env("ADBENCH_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    let exit_code = match cmd_bench::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("adbench: {}", e);
            match e.downcast_ref::<adbench::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code.code());
}
