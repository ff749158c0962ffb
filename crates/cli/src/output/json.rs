// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! The size report is written as one pretty-printed object.

use std::io::Write;

use crate::report::SizeReport;

/// Write the size report as JSON followed by a newline.
pub fn write_report<W: Write>(mut out: W, report: &SizeReport) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
