// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON summary of a validation pass, for CI artifacts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;
use tlsbase_compare::VersionComparison;
use tlsbase_flow::ProtocolVersion;

use crate::validate::Validation;

#[derive(Debug, Serialize)]
pub struct ReportDocument<'a> {
    pub generated_at: DateTime<Utc>,
    pub passed: bool,
    pub corrupt_flows: usize,
    pub versions: BTreeMap<ProtocolVersion, VersionEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct VersionEntry<'a> {
    pub baseline: &'a Path,
    pub baseline_sha256: &'a str,
    pub baseline_modified: DateTime<Utc>,
    #[serde(flatten)]
    pub comparison: &'a VersionComparison,
}

impl<'a> ReportDocument<'a> {
    pub fn new(validation: &'a Validation) -> Self {
        let versions = validation
            .baselines
            .iter()
            .filter_map(|info| {
                let comparison = validation.report.get(info.version)?;
                Some((
                    info.version,
                    VersionEntry {
                        baseline: &info.path,
                        baseline_sha256: &info.sha256,
                        baseline_modified: DateTime::<Utc>::from(info.modified),
                        comparison,
                    },
                ))
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            passed: validation.report.is_clean(),
            corrupt_flows: validation.report.corrupt_count(),
            versions,
        }
    }
}

/// Write the summary as pretty JSON, creating parent directories.
pub fn write(path: &Path, validation: &Validation) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(&ReportDocument::new(validation))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
