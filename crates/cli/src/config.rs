//! Configuration parsing and validation.
//!
//! Handles adbench.toml parsing with version validation and unknown key warnings.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Config file name looked up during discovery.
pub const CONFIG_FILE_NAME: &str = "adbench.toml";

/// Known top-level keys.
const KNOWN_KEYS: &[&str] = &["version", "build", "bench", "artifacts"];
const KNOWN_BUILD_KEYS: &[&str] = &["program", "clean_target", "timed"];
const KNOWN_BENCH_KEYS: &[&str] = &["program", "warmup", "extra_args"];
const KNOWN_ARTIFACTS_KEYS: &[&str] = &["dir"];

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: Option<i64>,

    #[serde(default)]
    build: Option<toml::Value>,

    #[serde(default)]
    bench: Option<toml::Value>,

    #[serde(default)]
    artifacts: Option<toml::Value>,

    #[serde(flatten)]
    unknown: std::collections::BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub bench: BenchConfig,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            build: BuildConfig::default(),
            bench: BenchConfig::default(),
            artifacts: ArtifactsConfig::default(),
        }
    }
}

/// Build tool configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build orchestration command.
    pub program: String,

    /// Pseudo-target that removes previous build outputs.
    pub clean_target: String,

    /// Report how long each build step took.
    pub timed: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            program: "make".to_string(),
            clean_target: "clean".to_string(),
            timed: true,
        }
    }
}

/// Benchmarking tool configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Statistical benchmarking command.
    pub program: String,

    /// Runs discarded before measurement begins.
    pub warmup: u32,

    /// Extra arguments placed before the command lines.
    pub extra_args: Vec<String>,
}

impl BenchConfig {
    pub const DEFAULT_WARMUP: u32 = 10;
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            program: "hyperfine".to_string(),
            warmup: Self::DEFAULT_WARMUP,
            extra_args: Vec::new(),
        }
    }
}

/// Where built executables are found.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub dir: PathBuf,
}

impl ArtifactsConfig {
    /// Artifact directory relative to `root`, without `.` components.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.dir)
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

/// Load config from a file.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path).map(|(config, _)| config)
}

/// Load config, printing a warning for each unknown key.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let (config, unknown) = parse(&content, path)?;
    for key in &unknown {
        warn_unknown_key(path, key);
    }
    Ok(config)
}

/// Parse config from string content.
///
/// Returns the config along with the dotted names of any unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<(Config, BTreeSet<String>)> {
    let config_error = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    let flexible: FlexibleConfig =
        toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    let version = flexible
        .version
        .ok_or_else(|| config_error("missing required field: version".to_string()))?;

    if version != SUPPORTED_VERSION {
        return Err(config_error(format!(
            "unsupported config version {} (supported: {})",
            version, SUPPORTED_VERSION
        )));
    }

    let mut unknown_keys = BTreeSet::new();

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            unknown_keys.insert(key.clone());
        }
    }

    collect_unknown_nested(&mut unknown_keys, "build", &flexible.build, KNOWN_BUILD_KEYS);
    collect_unknown_nested(&mut unknown_keys, "bench", &flexible.bench, KNOWN_BENCH_KEYS);
    collect_unknown_nested(
        &mut unknown_keys,
        "artifacts",
        &flexible.artifacts,
        KNOWN_ARTIFACTS_KEYS,
    );

    let config: Config = toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    if config.build.program.trim().is_empty() {
        return Err(config_error("build.program must not be empty".to_string()));
    }
    if config.bench.program.trim().is_empty() {
        return Err(config_error("bench.program must not be empty".to_string()));
    }

    Ok((config, unknown_keys))
}

fn collect_unknown_nested(
    unknown: &mut BTreeSet<String>,
    section: &str,
    value: &Option<toml::Value>,
    known: &[&str],
) {
    if let Some(toml::Value::Table(table)) = value {
        for key in table.keys() {
            if !known.contains(&key.as_str()) {
                unknown.insert(format!("{section}.{key}"));
            }
        }
    }
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "adbench: warning: {}: unknown config key `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
