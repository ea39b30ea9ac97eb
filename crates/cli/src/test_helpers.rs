// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixtures shared by unit tests: stand-in analyzers and gzip files.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write an executable `/bin/sh` script.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Analyzer stand-in: gzips the input "pcap" (plain JSON lines) into the
/// requested output, and appends its argument list to `args.log` in `dir`.
#[cfg(unix)]
pub fn fake_analyzer(dir: &Path) -> PathBuf {
    let log = dir.join("args.log");
    let body = format!(
        r#"printf '%s\n' "$*" >> '{}'
out=""
outdir=""
input=""
for arg in "$@"; do
  case "$arg" in
    output=*) out="${{arg#output=}}" ;;
    outdir=*) outdir="${{arg#outdir=}}" ;;
    tls=1) ;;
    *) input="$arg" ;;
  esac
done
if [ -n "$outdir" ]; then out="$outdir/$out"; fi
gzip -c < "$input" > "$out""#,
        log.display()
    );
    write_script(dir, "fake-analyzer", &body)
}

/// Lines the fake analyzer was invoked with, one per run.
pub fn logged_args(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("args.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Write raw lines as a gzip file.
pub fn write_gz(path: &Path, lines: &[&str]) {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    for line in lines {
        encoder.write_all(line.as_bytes()).unwrap();
        encoder.write_all(b"\n").unwrap();
    }
    std::fs::write(path, encoder.finish().unwrap()).unwrap();
}

/// Write a fixture the fake analyzer will turn into output.
pub fn write_fixture(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

/// A flow record as one JSON line.
pub const FLOW: &str = r#"{"sa":"10.0.0.1","da":"10.0.0.2","sp":443,"dp":51000,"pr":6,"tls":{"scs":"c02f"}}"#;

/// Configuration rooted in `root`: fake analyzer, `pcaps/`, `baselines/`
/// and `work/`, covering only `versions`.
#[cfg(unix)]
pub fn harness_config(
    root: &Path,
    versions: &[tlsbase_flow::ProtocolVersion],
) -> crate::config::HarnessConfig {
    let baseline_dir = root.join("baselines");
    std::fs::create_dir_all(&baseline_dir).unwrap();
    crate::config::HarnessConfig {
        analyzer: fake_analyzer(root),
        baseline_dir,
        pcap_dir: root.join("pcaps"),
        work_dir: root.join("work"),
        versions: versions.to_vec(),
        ..Default::default()
    }
}
