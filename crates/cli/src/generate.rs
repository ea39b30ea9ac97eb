// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Baseline generation.

use log::info;
use std::path::PathBuf;

use crate::analyzer::{Analyzer, Invocation};
use crate::baseline::BaselineStore;
use crate::config::HarnessConfig;
use crate::harness::HarnessError;

/// Run the analyzer over every configured fixture at once, writing one new
/// baseline file per version. Returns the paths written.
pub async fn generate_baseline(config: &HarnessConfig) -> Result<Vec<PathBuf>, HarnessError> {
    let store = BaselineStore::new(&config.baseline_dir);
    store.ensure_dir()?;
    let outdir = std::path::absolute(store.dir()).map_err(|source| HarnessError::Path {
        path: store.dir().to_path_buf(),
        source,
    })?;

    let mut invocations = Vec::with_capacity(config.versions.len());
    for &version in &config.versions {
        let fixture = config
            .fixture_path(version)
            .map_err(|source| HarnessError::Path {
                path: config.pcap_dir.join(version.fixture_name()),
                source,
            })?;
        invocations.push(
            Invocation::new(config.naming.file_name(version), fixture).with_outdir(&outdir),
        );
    }

    info!(
        "generating TLS baselines for {} in {}",
        config
            .versions
            .iter()
            .map(|v| v.tag())
            .collect::<Vec<_>>()
            .join(", "),
        outdir.display()
    );

    Analyzer::new(&config.analyzer, config.timing)
        .run_all(&invocations)
        .await?;

    let written: Vec<PathBuf> = invocations
        .iter()
        .map(|inv| outdir.join(&inv.output))
        .collect();
    for path in &written {
        info!("wrote baseline {}", path.display());
    }
    Ok(written)
}

#[cfg(test)]
#[path = "generate_tests.rs"]
mod tests;
