// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diffs between a corrupt flow and its likely baseline counterpart.

use similar::TextDiff;
use tlsbase_flow::FlowRecord;

/// First baseline flow with the same five-tuple as `flow`.
pub fn closest_by_key<'a>(flow: &FlowRecord, baseline: &[&'a FlowRecord]) -> Option<&'a FlowRecord> {
    let key = flow.key();
    baseline.iter().copied().find(|base| base.key() == key)
}

/// Unified diff of two flows rendered as indented JSON.
pub fn render(baseline: &FlowRecord, new: &FlowRecord) -> String {
    let old = baseline.to_pretty_json();
    let new = new.to_pretty_json();
    TextDiff::from_lines(&old, &new)
        .unified_diff()
        .context_radius(2)
        .header("baseline", "new")
        .to_string()
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
