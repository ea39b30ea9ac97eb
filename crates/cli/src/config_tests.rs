// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use clap::Parser;
use std::io::Write;

fn parse_cli(args: &[&str]) -> Cli {
    let mut argv = vec!["tlsbase"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_defaults() {
    let config = HarnessConfig::merge(&parse_cli(&[]), FileConfig::default());
    assert_eq!(config.mode, Mode::Validate);
    assert_eq!(config.naming, BaselineNaming::Unique);
    assert_eq!(config.baseline_dir, PathBuf::from(DEFAULT_BASELINE_DIR));
    assert_eq!(config.pcap_dir, PathBuf::from(DEFAULT_PCAP_DIR));
    assert_eq!(config.work_dir, PathBuf::from("."));
    assert_eq!(config.versions, ProtocolVersion::DEFAULT.to_vec());
    assert_eq!(config.timing.timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
    assert_eq!(config.timing.grace, Duration::from_millis(DEFAULT_GRACE_MS));
    assert!(config.report.is_none());
    // bin/joy has a directory part and is made absolute
    assert!(config.analyzer.is_absolute());
    assert!(config.analyzer.ends_with(DEFAULT_ANALYZER));
}

#[test]
fn test_create_base_selects_generator() {
    let config = HarnessConfig::merge(&parse_cli(&["--create-base"]), FileConfig::default());
    assert_eq!(config.mode, Mode::GenerateBaseline);
}

#[test]
fn test_base_generic_selects_fixed_names() {
    let config = HarnessConfig::merge(&parse_cli(&["--base-generic"]), FileConfig::default());
    assert_eq!(config.naming, BaselineNaming::Generic);
}

#[test]
fn test_bare_analyzer_name_left_for_path_lookup() {
    let config = HarnessConfig::merge(&parse_cli(&["--analyzer", "joy"]), FileConfig::default());
    assert_eq!(config.analyzer, PathBuf::from("joy"));
}

#[test]
fn test_parse_file_config() {
    let file = FileConfig::parse(
        r#"
analyzer = "/opt/joy/bin/joy"
baseline_dir = "/var/lib/tlsbase"
create_base = true
versions = ["tls12", "tls13"]
timeout_ms = 5000
"#,
    )
    .unwrap();

    assert_eq!(file.analyzer, Some(PathBuf::from("/opt/joy/bin/joy")));
    assert_eq!(file.create_base, Some(true));
    assert_eq!(
        file.versions,
        Some(vec![ProtocolVersion::Tls12, ProtocolVersion::Tls13])
    );
    assert_eq!(file.grace_ms, None);
}

#[test]
fn test_file_config_rejects_unknown_fields() {
    assert!(FileConfig::parse("basline_dir = \"typo\"").is_err());
}

#[test]
fn test_file_config_rejects_unknown_version() {
    assert!(FileConfig::parse("versions = [\"ssl3\"]").is_err());
}

#[test]
fn test_file_values_apply_when_cli_silent() {
    let file = FileConfig {
        baseline_dir: Some(PathBuf::from("/from/file")),
        base_generic: Some(true),
        versions: Some(vec![ProtocolVersion::Tls11]),
        grace_ms: Some(50),
        ..Default::default()
    };
    let config = HarnessConfig::merge(&parse_cli(&[]), file);

    assert_eq!(config.baseline_dir, PathBuf::from("/from/file"));
    assert_eq!(config.naming, BaselineNaming::Generic);
    assert_eq!(config.versions, vec![ProtocolVersion::Tls11]);
    assert_eq!(config.timing.grace, Duration::from_millis(50));
}

#[test]
fn test_cli_overrides_file() {
    let file = FileConfig {
        baseline_dir: Some(PathBuf::from("/from/file")),
        versions: Some(vec![ProtocolVersion::Tls11]),
        timeout_ms: Some(10),
        ..Default::default()
    };
    let cli = parse_cli(&[
        "--baseline-dir",
        "/from/cli",
        "--versions",
        "tls10",
        "--timeout-ms",
        "20",
    ]);
    let config = HarnessConfig::merge(&cli, file);

    assert_eq!(config.baseline_dir, PathBuf::from("/from/cli"));
    assert_eq!(config.versions, vec![ProtocolVersion::Tls10]);
    assert_eq!(config.timing.timeout, Duration::from_millis(20));
}

#[test]
fn test_duplicate_versions_collapse() {
    let cli = parse_cli(&["--versions", "tls12,tls10,tls12"]);
    let config = HarnessConfig::merge(&cli, FileConfig::default());
    assert_eq!(
        config.versions,
        vec![ProtocolVersion::Tls12, ProtocolVersion::Tls10]
    );
}

#[test]
fn test_from_cli_loads_config_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(b"pcap_dir = \"/fixtures\"\n").unwrap();
    file.flush().unwrap();

    let cli = parse_cli(&["--config", file.path().to_str().unwrap()]);
    let config = HarnessConfig::from_cli(&cli).unwrap();
    assert_eq!(config.pcap_dir, PathBuf::from("/fixtures"));
}

#[test]
fn test_from_cli_missing_config_file() {
    let cli = parse_cli(&["--config", "/nonexistent/tlsbase.toml"]);
    let err = HarnessConfig::from_cli(&cli).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_fixture_path_is_absolute() {
    let config = HarnessConfig {
        pcap_dir: PathBuf::from("pcaps"),
        ..Default::default()
    };
    let path = config.fixture_path(ProtocolVersion::Tls10).unwrap();
    assert!(path.is_absolute());
    assert!(path.ends_with("pcaps/tls10.pcap"));
}

#[test]
fn test_from_cli_rejects_empty_version_list() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(b"versions = []\nbaseline_dir = \"/nonexistent\"\n")
        .unwrap();
    file.flush().unwrap();

    let cli = parse_cli(&["--config", file.path().to_str().unwrap()]);
    let err = HarnessConfig::from_cli(&cli).unwrap_err();
    assert!(matches!(err, ConfigError::NoVersions));
}
