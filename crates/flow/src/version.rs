// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! TLS protocol versions exercised by the fixtures, and the file names
//! derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A TLS protocol version with its own pcap fixture and baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVersion {
    Tls10,
    Tls11,
    Tls12,
    /// No fixture ships for TLS 1.3 yet; only runs when selected explicitly.
    Tls13,
}

impl ProtocolVersion {
    /// Versions checked when none are configured.
    pub const DEFAULT: [ProtocolVersion; 3] = [
        ProtocolVersion::Tls10,
        ProtocolVersion::Tls11,
        ProtocolVersion::Tls12,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ProtocolVersion::Tls10 => "tls10",
            ProtocolVersion::Tls11 => "tls11",
            ProtocolVersion::Tls12 => "tls12",
            ProtocolVersion::Tls13 => "tls13",
        }
    }

    /// Fixture file name, e.g. `tls12.pcap`
    pub fn fixture_name(self) -> String {
        format!("{}.pcap", self.tag())
    }

    /// Baseline file name, `[<prefix>_]base-<tag>.json.gz`
    pub fn baseline_name(self, prefix: Option<&str>) -> String {
        match prefix {
            Some(prefix) => format!("{}_base-{}.json.gz", prefix, self.tag()),
            None => format!("base-{}.json.gz", self.tag()),
        }
    }

    /// Glob matching every baseline name for this version, prefixed or not.
    pub fn baseline_glob(self) -> String {
        format!("*base-{}.json.gz", self.tag())
    }

    /// Fixed name of the analyzer output written during validation.
    pub fn temp_output_name(self) -> String {
        format!("tmp-{}.json.gz", self.tag())
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown protocol version '{0}' (expected one of tls10, tls11, tls12, tls13)")]
pub struct UnknownVersion(pub String);

impl FromStr for ProtocolVersion {
    type Err = UnknownVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tls10" => Ok(ProtocolVersion::Tls10),
            "tls11" => Ok(ProtocolVersion::Tls11),
            "tls12" => Ok(ProtocolVersion::Tls12),
            "tls13" => Ok(ProtocolVersion::Tls13),
            _ => Err(UnknownVersion(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
