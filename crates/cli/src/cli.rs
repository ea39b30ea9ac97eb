// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing.
//!
//! Every option is optional here so that a config file can fill the gaps;
//! defaults are applied in [`crate::config`].

use clap::Parser;
use std::path::PathBuf;
use tlsbase_flow::ProtocolVersion;

/// TLS baseline regression harness
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tlsbase", version, about = "Validate analyzer TLS output against baselines")]
pub struct Cli {
    /// Analyzer executable to run against the fixtures
    #[arg(long, value_name = "PATH", env = "TLSBASE_ANALYZER")]
    pub analyzer: Option<PathBuf>,

    /// Directory holding baseline files
    #[arg(long, value_name = "DIR", env = "TLSBASE_BASELINE_DIR")]
    pub baseline_dir: Option<PathBuf>,

    /// Directory holding the <version>.pcap fixtures
    #[arg(long, value_name = "DIR", env = "TLSBASE_PCAP_DIR")]
    pub pcap_dir: Option<PathBuf>,

    /// Directory where temporary analyzer output is written during validation
    #[arg(long, value_name = "DIR", env = "TLSBASE_WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    /// Generate a new set of baseline files instead of validating
    #[arg(long)]
    pub create_base: bool,

    /// Name baseline files base-<version>.json.gz without a unique prefix
    #[arg(long)]
    pub base_generic: bool,

    /// Protocol versions to process (comma separated)
    #[arg(long, value_delimiter = ',', value_name = "VERSIONS")]
    pub versions: Vec<ProtocolVersion>,

    /// Maximum time to wait for one analyzer run, in milliseconds
    #[arg(long, value_name = "MS", env = "TLSBASE_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Time between SIGTERM and SIGKILL for an overdue analyzer, in milliseconds
    #[arg(long, value_name = "MS", env = "TLSBASE_GRACE_MS")]
    pub grace_ms: Option<u64>,

    /// Write a JSON summary of the validation to this file
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "PATH", env = "TLSBASE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace, -vvv trace for all crates)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
