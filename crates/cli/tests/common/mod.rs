// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for end-to-end harness tests.
//!
//! A [`Workspace`] is a temporary directory laid out the way the harness
//! expects it, with a shell script standing in for the analyzer. The script
//! gzips its input (a "pcap" made of JSON lines) into the requested output.

#![allow(dead_code)]

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const FLOW: &str =
    r#"{"sa":"10.0.0.1","da":"10.0.0.2","sp":443,"dp":51000,"pr":6,"tls":{"scs":"c02f"}}"#;

const ANALYZER: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$(dirname "$0")/args.log"
out=""
outdir=""
input=""
for arg in "$@"; do
  case "$arg" in
    output=*) out="${arg#output=}" ;;
    outdir=*) outdir="${arg#outdir=}" ;;
    tls=1) ;;
    *) input="$arg" ;;
  esac
done
if [ -n "$outdir" ]; then out="$outdir/$out"; fi
gzip -c < "$input" > "$out"
"#;

pub struct Workspace {
    pub root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let ws = Self {
            root: tempfile::tempdir().unwrap(),
        };
        std::fs::create_dir_all(ws.baselines()).unwrap();
        std::fs::create_dir_all(ws.pcaps()).unwrap();
        ws.write_analyzer(ANALYZER);
        ws
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn baselines(&self) -> PathBuf {
        self.path().join("baselines")
    }

    pub fn pcaps(&self) -> PathBuf {
        self.path().join("pcaps")
    }

    pub fn work(&self) -> PathBuf {
        self.path().join("work")
    }

    pub fn analyzer(&self) -> PathBuf {
        self.path().join("analyzer")
    }

    /// Replace the analyzer script.
    pub fn write_analyzer(&self, script: &str) {
        let path = self.analyzer();
        std::fs::write(&path, script).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    /// Write `<version>.pcap` with the flows the analyzer should report.
    pub fn fixture(&self, version: &str, lines: &[&str]) {
        std::fs::write(
            self.pcaps().join(format!("{}.pcap", version)),
            lines.join("\n") + "\n",
        )
        .unwrap();
    }

    /// Write a gzip baseline file named `name` into the baseline directory.
    pub fn baseline(&self, name: &str, lines: &[&str]) {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        for line in lines {
            encoder.write_all(line.as_bytes()).unwrap();
            encoder.write_all(b"\n").unwrap();
        }
        std::fs::write(self.baselines().join(name), encoder.finish().unwrap()).unwrap();
    }

    /// Argument lines the analyzer has been run with.
    pub fn analyzer_runs(&self) -> Vec<String> {
        std::fs::read_to_string(self.path().join("args.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn baseline_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.baselines())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// The harness binary pointed at this workspace.
    #[allow(deprecated)]
    pub fn harness(&self) -> Command {
        let mut cmd = Command::cargo_bin("tlsbase").unwrap();
        for var in [
            "TLSBASE_ANALYZER",
            "TLSBASE_BASELINE_DIR",
            "TLSBASE_PCAP_DIR",
            "TLSBASE_WORK_DIR",
            "TLSBASE_TIMEOUT_MS",
            "TLSBASE_GRACE_MS",
            "TLSBASE_CONFIG",
            "RUST_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.path())
            .arg("--analyzer")
            .arg(self.analyzer())
            .arg("--baseline-dir")
            .arg(self.baselines())
            .arg("--pcap-dir")
            .arg(self.pcaps())
            .arg("--work-dir")
            .arg(self.work());
        cmd
    }
}
