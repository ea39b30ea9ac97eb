// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration.
//!
//! A [`HarnessConfig`] is resolved once at startup from the command line,
//! the optional TOML file and the built-in defaults (in that order of
//! precedence), and is read-only afterwards.

use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tlsbase_flow::ProtocolVersion;

use crate::analyzer::AnalyzerTiming;
use crate::baseline::BaselineNaming;
use crate::cli::Cli;

/// Default analyzer location, relative to the working directory
pub const DEFAULT_ANALYZER: &str = "bin/joy";
/// Default baseline directory
pub const DEFAULT_BASELINE_DIR: &str = "baseline_tls";
/// Default fixture directory
pub const DEFAULT_PCAP_DIR: &str = "pcaps";
/// Default bound on a single analyzer run
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default time between SIGTERM and SIGKILL
pub const DEFAULT_GRACE_MS: u64 = 1_000;

/// What the harness does in this run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Compare fresh analyzer output with the latest baselines
    #[default]
    Validate,
    /// Write a new set of baseline files
    GenerateBaseline,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Validate => write!(f, "baseline validation"),
            Mode::GenerateBaseline => write!(f, "baseline generation"),
        }
    }
}

/// Resolved, immutable harness configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    pub mode: Mode,
    pub analyzer: PathBuf,
    pub baseline_dir: PathBuf,
    pub pcap_dir: PathBuf,
    pub work_dir: PathBuf,
    pub naming: BaselineNaming,
    pub versions: Vec<ProtocolVersion>,
    pub timing: AnalyzerTiming,
    pub report: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            analyzer: PathBuf::from(DEFAULT_ANALYZER),
            baseline_dir: PathBuf::from(DEFAULT_BASELINE_DIR),
            pcap_dir: PathBuf::from(DEFAULT_PCAP_DIR),
            work_dir: PathBuf::from("."),
            naming: BaselineNaming::default(),
            versions: ProtocolVersion::DEFAULT.to_vec(),
            timing: AnalyzerTiming::default(),
            report: None,
        }
    }
}

impl HarnessConfig {
    /// Resolve the configuration for a parsed command line, loading the
    /// config file it names.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let config = Self::merge(cli, file);
        if config.versions.is_empty() {
            return Err(ConfigError::NoVersions);
        }
        Ok(config)
    }

    /// Layer command-line values over file values over defaults.
    pub fn merge(cli: &Cli, file: FileConfig) -> Self {
        let defaults = Self::default();

        let mode = if cli.create_base || file.create_base.unwrap_or(false) {
            Mode::GenerateBaseline
        } else {
            Mode::Validate
        };
        let naming = if cli.base_generic || file.base_generic.unwrap_or(false) {
            BaselineNaming::Generic
        } else {
            BaselineNaming::Unique
        };

        let versions = if !cli.versions.is_empty() {
            dedup(&cli.versions)
        } else {
            file.versions
                .map(|v| dedup(&v))
                .unwrap_or(defaults.versions)
        };

        let timeout_ms = cli.timeout_ms.or(file.timeout_ms);
        let grace_ms = cli.grace_ms.or(file.grace_ms);
        let timing = AnalyzerTiming {
            timeout: timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.timing.timeout),
            grace: grace_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.timing.grace),
        };

        let analyzer = cli
            .analyzer
            .clone()
            .or(file.analyzer)
            .unwrap_or(defaults.analyzer);

        Self {
            mode,
            analyzer: resolve_executable(analyzer),
            baseline_dir: cli
                .baseline_dir
                .clone()
                .or(file.baseline_dir)
                .unwrap_or(defaults.baseline_dir),
            pcap_dir: cli
                .pcap_dir
                .clone()
                .or(file.pcap_dir)
                .unwrap_or(defaults.pcap_dir),
            work_dir: cli
                .work_dir
                .clone()
                .or(file.work_dir)
                .unwrap_or(defaults.work_dir),
            naming,
            versions,
            timing,
            report: cli.report.clone().or(file.report),
        }
    }

    /// Absolute path of the fixture for a version.
    pub fn fixture_path(&self, version: ProtocolVersion) -> io::Result<PathBuf> {
        std::path::absolute(self.pcap_dir.join(version.fixture_name()))
    }
}

/// Keep the first occurrence of each version.
fn dedup(versions: &[ProtocolVersion]) -> Vec<ProtocolVersion> {
    let mut out = Vec::with_capacity(versions.len());
    for v in versions {
        if !out.contains(v) {
            out.push(*v);
        }
    }
    out
}

/// Paths with a directory part are made absolute so they survive the
/// analyzer's working-directory change; bare names are left for `PATH`
/// lookup.
fn resolve_executable(path: PathBuf) -> PathBuf {
    if path.components().count() > 1 {
        std::path::absolute(&path).unwrap_or(path)
    } else {
        path
    }
}

/// Contents of a TOML configuration file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub analyzer: Option<PathBuf>,

    #[serde(default)]
    pub baseline_dir: Option<PathBuf>,

    #[serde(default)]
    pub pcap_dir: Option<PathBuf>,

    #[serde(default)]
    pub work_dir: Option<PathBuf>,

    /// Switch to baseline generation
    #[serde(default)]
    pub create_base: Option<bool>,

    /// Fixed baseline file names
    #[serde(default)]
    pub base_generic: Option<bool>,

    #[serde(default)]
    pub versions: Option<Vec<ProtocolVersion>>,

    #[serde(default)]
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub grace_ms: Option<u64>,

    #[serde(default)]
    pub report: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("no protocol versions selected")]
    NoVersions,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
