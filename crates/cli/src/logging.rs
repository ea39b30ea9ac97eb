// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Log setup.

use env_logger::Builder;
use log::LevelFilter;

/// Prefix shared by the harness crates' module paths.
const CRATE_PREFIX: &str = "tlsbase";

/// Module filter and level for a verbosity setting. `None` applies the
/// level to every crate.
pub fn filter_for(verbose: u8, quiet: bool) -> (Option<&'static str>, LevelFilter) {
    match (quiet, verbose) {
        (true, _) => (Some(CRATE_PREFIX), LevelFilter::Warn),
        (false, 0) => (Some(CRATE_PREFIX), LevelFilter::Info),
        (false, 1) => (Some(CRATE_PREFIX), LevelFilter::Debug),
        (false, 2) => (Some(CRATE_PREFIX), LevelFilter::Trace),
        (false, _) => (None, LevelFilter::Trace),
    }
}

/// Install the global logger. `RUST_LOG` directives are applied first.
pub fn init(verbose: u8, quiet: bool) {
    let (module, level) = filter_for(verbose, quiet);
    // A logger may already be installed, e.g. by a test harness.
    let _ = Builder::from_default_env()
        .filter(module, level)
        .format_target(false)
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
