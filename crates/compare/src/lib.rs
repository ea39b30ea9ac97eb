// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Baseline comparison for analyzer flow output.
//!
//! New flows are checked one by one against the baseline flows of the same
//! protocol version. A flow passes when some baseline flow is equal to it in
//! every field; otherwise it is reported as corrupt for a human to review.

pub mod diff;
mod engine;
mod report;

pub use engine::{compare, CorruptFlow, VersionComparison};
pub use report::{ComparisonReport, CORRUPTION_EXIT_CODE};
