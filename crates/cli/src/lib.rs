// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! TLS baseline regression harness
//!
//! Runs a flow analyzer over fixed TLS packet captures and either records
//! its output as a new baseline or checks fresh output against the latest
//! baseline for each protocol version. Any new flow record without an
//! exact match in the baseline fails the run.

pub mod analyzer;
pub mod baseline;
pub mod cli;
pub mod config;
pub mod generate;
pub mod harness;
pub mod logging;
pub mod report;
pub mod validate;

#[cfg(test)]
mod test_helpers;
