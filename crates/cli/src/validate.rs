// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Baseline validation.
//!
//! Baselines are loaded first so a missing one aborts before any analyzer
//! runs. The analyzer then runs once per version, one at a time, writing to
//! fixed `tmp-<version>.json.gz` names in the work directory. Those files are
//! removed when the pass ends, whichever way it ends.

use log::{debug, warn};
use std::io;
use std::path::{Path, PathBuf};
use tlsbase_compare::{compare, ComparisonReport};
use tlsbase_flow::{jsonl, ProtocolVersion, Record};

use crate::analyzer::{Analyzer, Invocation};
use crate::baseline::{BaselineInfo, BaselineStore};
use crate::config::HarnessConfig;
use crate::harness::HarnessError;

/// Result of a completed validation pass.
#[derive(Clone, Debug)]
pub struct Validation {
    pub report: ComparisonReport,
    /// Baseline used for each version, in configured order
    pub baselines: Vec<BaselineInfo>,
}

/// Runs one validation pass for a configuration.
pub struct Validator<'a> {
    config: &'a HarnessConfig,
    store: BaselineStore,
    analyzer: Analyzer,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a HarnessConfig) -> Self {
        Self {
            config,
            store: BaselineStore::new(&config.baseline_dir),
            analyzer: Analyzer::new(&config.analyzer, config.timing)
                .with_work_dir(&config.work_dir),
        }
    }

    pub async fn run(&self) -> Result<Validation, HarnessError> {
        let mut baselines = Vec::with_capacity(self.config.versions.len());
        for &version in &self.config.versions {
            baselines.push(self.store.load_latest(version)?);
        }

        std::fs::create_dir_all(&self.config.work_dir).map_err(|source| HarnessError::Path {
            path: self.config.work_dir.clone(),
            source,
        })?;
        let outputs = TempOutputs::new(&self.config.work_dir, &self.config.versions);

        let mut fresh = Vec::with_capacity(self.config.versions.len());
        for (version, output) in &outputs.paths {
            fresh.push(self.run_version(*version, output).await?);
        }

        let mut report = ComparisonReport::new();
        for (baseline, new) in baselines.iter().zip(&fresh) {
            report.insert(baseline.info.version, compare(new, &baseline.records));
        }

        Ok(Validation {
            report,
            baselines: baselines.into_iter().map(|b| b.info).collect(),
        })
    }

    async fn run_version(
        &self,
        version: ProtocolVersion,
        output: &Path,
    ) -> Result<Vec<Record>, HarnessError> {
        let fixture = self
            .config
            .fixture_path(version)
            .map_err(|source| HarnessError::Path {
                path: self.config.pcap_dir.join(version.fixture_name()),
                source,
            })?;

        self.analyzer
            .run(&Invocation::new(version.temp_output_name(), fixture))
            .await?;

        let records = jsonl::load(output).map_err(|source| HarnessError::Output {
            path: output.to_path_buf(),
            source,
        })?;
        debug!(
            "{}: analyzer produced {} records in {}",
            version,
            records.len(),
            output.display()
        );
        Ok(records)
    }
}

/// Temporary analyzer outputs, deleted on creation and on drop.
struct TempOutputs {
    paths: Vec<(ProtocolVersion, PathBuf)>,
}

impl TempOutputs {
    fn new(dir: &Path, versions: &[ProtocolVersion]) -> Self {
        let outputs = Self {
            paths: versions
                .iter()
                .map(|v| (*v, dir.join(v.temp_output_name())))
                .collect(),
        };
        // A leftover from an interrupted run must not pass for fresh output.
        outputs.remove_all();
        outputs
    }

    fn remove_all(&self) {
        for (_, path) in &self.paths {
            match std::fs::remove_file(path) {
                Ok(()) => debug!("removed {}", path.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!("failed to remove {}: {}", path.display(), e),
            }
        }
    }
}

impl Drop for TempOutputs {
    fn drop(&mut self) {
        self.remove_all();
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
