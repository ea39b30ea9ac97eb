// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Baseline file discovery and loading.
//!
//! Baselines live in one directory as `[<id>_]base-<version>.json.gz`. When
//! several files exist for a version, the most recently modified one wins.

use chrono::{DateTime, Local};
use log::debug;
use sha2::{Digest, Sha256};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tlsbase_flow::{jsonl, JsonlError, ProtocolVersion, Record};
use uuid::Uuid;

/// How new baseline files are named.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BaselineNaming {
    /// `<uuid>_base-<version>.json.gz`, never overwrites an older baseline
    #[default]
    Unique,
    /// `base-<version>.json.gz`
    Generic,
}

impl BaselineNaming {
    pub fn file_name(self, version: ProtocolVersion) -> String {
        match self {
            BaselineNaming::Unique => version.baseline_name(Some(&Uuid::new_v4().to_string())),
            BaselineNaming::Generic => version.baseline_name(None),
        }
    }
}

/// Identity of the baseline file a comparison used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaselineInfo {
    pub version: ProtocolVersion,
    pub path: PathBuf,
    pub modified: SystemTime,
    /// Hex SHA-256 of the compressed file
    pub sha256: String,
}

/// A loaded baseline.
#[derive(Clone, Debug)]
pub struct Baseline {
    pub info: BaselineInfo,
    pub records: Vec<Record>,
}

/// The directory holding baseline files.
#[derive(Clone, Debug)]
pub struct BaselineStore {
    dir: PathBuf,
}

impl BaselineStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory and its parents if missing.
    pub fn ensure_dir(&self) -> Result<(), BaselineError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| BaselineError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    /// Every baseline file for `version` with its modification time.
    pub fn candidates(
        &self,
        version: ProtocolVersion,
    ) -> Result<Vec<(PathBuf, SystemTime)>, BaselineError> {
        let pattern = format!(
            "{}/{}",
            glob::Pattern::escape(&self.dir.to_string_lossy()),
            version.baseline_glob()
        );
        let paths = glob::glob(&pattern).map_err(|source| BaselineError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        let mut found = Vec::new();
        for path in paths.filter_map(|entry| entry.ok()) {
            let metadata = std::fs::metadata(&path).map_err(|source| BaselineError::Io {
                path: path.clone(),
                source,
            })?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().map_err(|source| BaselineError::Io {
                path: path.clone(),
                source,
            })?;
            found.push((path, modified));
        }
        Ok(found)
    }

    /// The most recently modified baseline file for `version`.
    ///
    /// Equal modification times fall back to the larger path, so the choice
    /// never depends on directory listing order.
    pub fn latest(&self, version: ProtocolVersion) -> Result<(PathBuf, SystemTime), BaselineError> {
        self.candidates(version)?
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
            .ok_or_else(|| BaselineError::NotFound {
                version,
                dir: self.dir.clone(),
            })
    }

    /// Resolve and decode the latest baseline for `version`.
    pub fn load_latest(&self, version: ProtocolVersion) -> Result<Baseline, BaselineError> {
        let (path, modified) = self.latest(version)?;
        debug!(
            "latest {} base file selected {} (modified {})",
            version,
            path.display(),
            DateTime::<Local>::from(modified).format("%Y-%m-%d %H:%M:%S")
        );

        let bytes = std::fs::read(&path).map_err(|source| BaselineError::Io {
            path: path.clone(),
            source,
        })?;
        let sha256 = hex::encode(Sha256::digest(&bytes));
        let records =
            jsonl::read_records(bytes.as_slice()).map_err(|source| BaselineError::Load {
                path: path.clone(),
                source,
            })?;
        debug!("{} baseline holds {} records", version, records.len());

        Ok(Baseline {
            info: BaselineInfo {
                version,
                path,
                modified,
                sha256,
            },
            records,
        })
    }
}

#[derive(Debug, Error)]
pub enum BaselineError {
    #[error(
        "no baseline files found for {version} in {}; supply a baseline directory with --baseline-dir",
        dir.display()
    )]
    NotFound {
        version: ProtocolVersion,
        dir: PathBuf,
    },

    #[error("invalid baseline pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("baseline I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to decode baseline {}: {source}", path.display())]
    Load { path: PathBuf, source: JsonlError },
}

#[cfg(test)]
#[path = "baseline_tests.rs"]
mod tests;
