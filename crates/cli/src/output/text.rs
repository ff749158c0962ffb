//! Text output formatter.
//!
//! Size report format, labels right-aligned on the colon:
//! ```text
//! backward_autodiff binary size: 2.50 MB
//!     backward_adpp binary size: 1.00 MB
//!                         ratio: 2.50
//! ```

use std::io::Write;
use std::time::Duration;

use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::color::scheme;
use crate::exec::Invocation;
use crate::file_size::human_size;
use crate::plan::Step;
use crate::report::SizeReport;

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(color_choice))
    }

    /// Formatter writing to stderr.
    pub fn stderr(color_choice: ColorChoice) -> Self {
        Self::new(StandardStream::stderr(color_choice))
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write artifact sizes and, when present, the ratio.
    pub fn write_report(&mut self, report: &SizeReport) -> std::io::Result<()> {
        let labels: Vec<String> = report
            .artifacts()
            .map(|a| format!("{} binary size", a.target))
            .collect();
        let width = labels
            .iter()
            .map(|label| label.chars().count())
            .chain(report.ratio.map(|_| "ratio".len()))
            .max()
            .unwrap_or(0);

        for (label, artifact) in labels.iter().zip(report.artifacts()) {
            self.write_label(label, width)?;
            writeln!(self.out, " {}", human_size(artifact.bytes))?;
        }

        if let Some(ratio) = report.ratio {
            self.write_label("ratio", width)?;
            write!(self.out, " ")?;
            let spec = if ratio > 1.0 {
                scheme::ratio_smaller()
            } else {
                scheme::ratio_larger()
            };
            self.out.set_color(&spec)?;
            write!(self.out, "{ratio:.2}")?;
            self.out.reset()?;
            writeln!(self.out)?;
        }

        self.out.flush()
    }

    fn write_label(&mut self, label: &str, width: usize) -> std::io::Result<()> {
        let pad = width.saturating_sub(label.chars().count());
        write!(self.out, "{:pad$}", "")?;
        self.out.set_color(&scheme::label())?;
        write!(self.out, "{label}")?;
        self.out.reset()?;
        write!(self.out, ":")
    }

    /// Write one invocation per line (for --dry-run).
    pub fn write_plan<'a>(
        &mut self,
        invocations: impl IntoIterator<Item = &'a Invocation>,
    ) -> std::io::Result<()> {
        for invocation in invocations {
            writeln!(self.out, "{invocation}")?;
        }
        self.out.flush()
    }

    /// Write a progress line such as `built backward_adpp in 1.23s`.
    pub fn write_timing(&mut self, step: &Step, elapsed: Duration) -> std::io::Result<()> {
        let verb = match step {
            Step::Clean => "cleaned".to_string(),
            Step::Build(target) => format!("built {target}"),
            Step::Benchmark => "benchmarked".to_string(),
        };
        self.out.set_color(&scheme::step())?;
        write!(self.out, "{verb}")?;
        self.out.reset()?;
        writeln!(self.out, " in {:.2}s", elapsed.as_secs_f64())?;
        self.out.flush()
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
