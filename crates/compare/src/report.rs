// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Comparison results across protocol versions.

use crate::diff;
use crate::engine::VersionComparison;
use log::{debug, info, log_enabled, warn, Level};
use serde::Serialize;
use std::collections::BTreeMap;
use tlsbase_flow::ProtocolVersion;

/// Exit code when any version has corrupt flows.
pub const CORRUPTION_EXIT_CODE: i32 = 1;

/// Per-version comparison results, ordered by version.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ComparisonReport {
    versions: BTreeMap<ProtocolVersion, VersionComparison>,
}

impl ComparisonReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for a version, replacing any earlier one.
    pub fn insert(&mut self, version: ProtocolVersion, comparison: VersionComparison) {
        self.versions.insert(version, comparison);
    }

    pub fn get(&self, version: ProtocolVersion) -> Option<&VersionComparison> {
        self.versions.get(&version)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProtocolVersion, &VersionComparison)> {
        self.versions.iter().map(|(v, c)| (*v, c))
    }

    /// True when no version has corrupt flows.
    pub fn is_clean(&self) -> bool {
        self.versions.values().all(VersionComparison::is_clean)
    }

    pub fn corrupt_count(&self) -> usize {
        self.versions.values().map(|c| c.corrupt.len()).sum()
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_clean() {
            0
        } else {
            CORRUPTION_EXIT_CODE
        }
    }

    /// Log every corrupt flow, then a review request per affected version.
    pub fn log_findings(&self) {
        for (version, comparison) in &self.versions {
            info!(
                "{}: {} flows validated, {} corrupt, {} non-flow records skipped ({} baseline flows)",
                version,
                comparison.validated,
                comparison.corrupt.len(),
                comparison.skipped,
                comparison.baseline_flows
            );

            if comparison.is_clean() {
                continue;
            }

            for corrupt in &comparison.corrupt {
                warn!("new corrupt flow {} --> {}", version, corrupt.record);
                if !log_enabled!(Level::Debug) {
                    continue;
                }
                match &corrupt.nearest {
                    Some(nearest) => debug!(
                        "closest {} baseline flow for {}:\n{}",
                        version,
                        corrupt.record.key(),
                        diff::render(nearest, &corrupt.record)
                    ),
                    None => debug!(
                        "no {} baseline flow shares the key {}",
                        version,
                        corrupt.record.key()
                    ),
                }
            }

            warn!(
                "{} corrupt {} flow(s): please manually compare them against the corresponding baseline file",
                comparison.corrupt.len(),
                version
            );
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
