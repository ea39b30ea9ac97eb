// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline comparison of two analyzer output files.

use clap::Parser;
use log::{error, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;

use tlsbase_compare::{compare, ComparisonReport};
use tlsbase_flow::{jsonl, ProtocolVersion};

/// Compare a new analyzer output file against a baseline file
#[derive(Parser, Debug)]
#[command(name = "flow-compare")]
#[command(about = "Report flows in NEW that have no identical flow in BASELINE")]
struct Cli {
    /// Baseline gzip JSON-lines file
    baseline: PathBuf,

    /// New gzip JSON-lines file
    new: PathBuf,

    /// Protocol version the files belong to (labels the output)
    #[arg(long, default_value = "tls12")]
    version: ProtocolVersion,

    /// Increase log verbosity (-v debug with diffs, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let baseline = match jsonl::load(&cli.baseline) {
        Ok(records) => records,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let new = match jsonl::load(&cli.new) {
        Ok(records) => records,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut report = ComparisonReport::new();
    report.insert(cli.version, compare(&new, &baseline));
    report.log_findings();

    ExitCode::from(report.exit_code() as u8)
}
