// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mode dispatch and exit status.
//!
//! The mode is fixed by the configuration before anything runs; a harness
//! either generates baselines or validates against them, then reports a
//! single exit code.

use log::{error, info, warn};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tlsbase_flow::JsonlError;

use crate::analyzer::AnalyzerError;
use crate::baseline::BaselineError;
use crate::config::{HarnessConfig, Mode};
use crate::generate::generate_baseline;
use crate::report;
use crate::validate::{Validation, Validator};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    #[error(transparent)]
    Baseline(#[from] BaselineError),

    #[error("failed to read analyzer output {}: {source}", path.display())]
    Output { path: PathBuf, source: JsonlError },

    #[error("cannot use path {}: {source}", path.display())]
    Path { path: PathBuf, source: io::Error },

    #[error("failed to write report {}: {source}", path.display())]
    Report { path: PathBuf, source: io::Error },

    #[error("no protocol versions selected; nothing to {0}")]
    NoVersions(&'static str),
}

impl HarnessError {
    /// Analyzer exit codes pass through; every other failure is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            HarnessError::Analyzer(e) => e.exit_code(),
            _ => 1,
        }
    }
}

/// How a harness run ended.
#[derive(Debug)]
pub enum Outcome {
    BaselineWritten(Vec<PathBuf>),
    Validated(Validation),
    Failed(HarnessError),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::BaselineWritten(_) => 0,
            Outcome::Validated(validation) => validation.report.exit_code(),
            Outcome::Failed(e) => e.exit_code(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code() == 0
    }
}

/// Runs the configured mode once.
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub async fn run(&self) -> Outcome {
        let outcome = match self.config.mode {
            _ if self.config.versions.is_empty() => {
                Outcome::Failed(HarnessError::NoVersions(match self.config.mode {
                    Mode::GenerateBaseline => "generate",
                    Mode::Validate => "validate",
                }))
            }
            Mode::GenerateBaseline => match generate_baseline(&self.config).await {
                Ok(paths) => Outcome::BaselineWritten(paths),
                Err(e) => Outcome::Failed(e),
            },
            Mode::Validate => self.validate().await,
        };

        if let Outcome::Failed(ref e) = outcome {
            error!("{}", e);
        }
        let code = outcome.exit_code();
        if code == 0 {
            // Final status line, kept visible under -q.
            warn!("SUCCESS");
        } else {
            warn!("{} failed with return code {}", self.config.mode, code);
            warn!("FAILED");
        }
        outcome
    }

    async fn validate(&self) -> Outcome {
        let validation = match Validator::new(&self.config).run().await {
            Ok(validation) => validation,
            Err(e) => return Outcome::Failed(e),
        };
        validation.report.log_findings();

        if let Some(ref path) = self.config.report {
            if let Err(source) = report::write(path, &validation) {
                return Outcome::Failed(HarnessError::Report {
                    path: path.clone(),
                    source,
                });
            }
            info!("wrote report {}", path.display());
        }

        Outcome::Validated(validation)
    }
}

#[cfg(test)]
#[path = "harness_tests.rs"]
mod tests;
