pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod driver;
pub mod error;
pub mod exec;
pub mod file_size;
pub mod output;
pub mod plan;
pub mod report;
pub mod target;

pub use cli::{Cli, OutputFormat};
pub use config::Config;
pub use driver::{Driver, Reporter};
pub use error::{Error, ExitCode, Result};
pub use exec::{Executor, Invocation, SystemExecutor};
pub use file_size::ArtifactSize;
pub use plan::{Benchmark, Plan, PlanOptions, Step};
pub use report::SizeReport;
pub use target::BuildTarget;
