// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-version flow comparison.

use crate::diff;
use serde::Serialize;
use tlsbase_flow::{FlowRecord, Record};

/// A new flow with no equal baseline flow.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorruptFlow {
    pub record: FlowRecord,

    /// First baseline flow sharing the five-tuple, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest: Option<FlowRecord>,
}

/// Outcome of comparing one version's new flows against its baseline.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VersionComparison {
    /// New flows with an equal baseline flow
    pub validated: usize,

    /// New records that are not flows
    pub skipped: usize,

    /// Flows in the baseline
    pub baseline_flows: usize,

    /// New flows without an equal baseline flow, in new-run order
    pub corrupt: Vec<CorruptFlow>,
}

impl VersionComparison {
    pub fn is_clean(&self) -> bool {
        self.corrupt.is_empty()
    }

    pub fn corrupt_records(&self) -> impl Iterator<Item = &FlowRecord> {
        self.corrupt.iter().map(|c| &c.record)
    }
}

/// Compare new records against baseline records of the same version.
///
/// Non-flow records on either side are ignored. A new flow matches when some
/// baseline flow is equal to it in every field; the scan stops at the first
/// such flow, so duplicates in the baseline make no difference.
pub fn compare(new: &[Record], baseline: &[Record]) -> VersionComparison {
    let base_flows: Vec<&FlowRecord> = baseline.iter().filter_map(Record::as_flow).collect();

    let mut result = VersionComparison {
        baseline_flows: base_flows.len(),
        ..Default::default()
    };

    for record in new {
        let Some(flow) = record.as_flow() else {
            result.skipped += 1;
            continue;
        };

        if base_flows.iter().any(|base| *base == flow) {
            result.validated += 1;
        } else {
            result.corrupt.push(CorruptFlow {
                record: flow.clone(),
                nearest: diff::closest_by_key(flow, &base_flows).cloned(),
            });
        }
    }

    result
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
