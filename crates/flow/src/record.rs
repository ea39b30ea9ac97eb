// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Flow and non-flow records.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Five-tuple keys identifying a flow.
///
/// Equality between flows always covers every field; these keys only pair
/// a mismatching flow with its likely counterpart when reporting.
pub const COMPARE_KEYS: [&str; 5] = ["sa", "da", "sp", "dp", "pr"];

/// A single flow emitted by the analyzer.
///
/// Loosely typed: any JSON fields are kept as-is. A `FlowRecord` always has
/// an `sa` (source address) field; the other canonical keys are `da`
/// (destination address), `sp`/`dp` (ports) and `pr` (IP protocol).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlowRecord(Map<String, Value>);

impl FlowRecord {
    /// Get a field by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Source address
    pub fn sa(&self) -> Option<&str> {
        self.get("sa").and_then(Value::as_str)
    }

    /// Destination address
    pub fn da(&self) -> Option<&str> {
        self.get("da").and_then(Value::as_str)
    }

    /// Source port
    pub fn sp(&self) -> Option<u64> {
        self.get("sp").and_then(Value::as_u64)
    }

    /// Destination port
    pub fn dp(&self) -> Option<u64> {
        self.get("dp").and_then(Value::as_u64)
    }

    /// IP protocol number
    pub fn pr(&self) -> Option<u64> {
        self.get("pr").and_then(Value::as_u64)
    }

    /// Project the record onto [`COMPARE_KEYS`].
    pub fn key(&self) -> FlowKey<'_> {
        FlowKey(COMPARE_KEYS.map(|k| self.get(k)))
    }

    /// All fields of the record
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as indented JSON, one field per line.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_default()
    }
}

impl TryFrom<Map<String, Value>> for FlowRecord {
    type Error = Map<String, Value>;

    /// Objects without `sa` are handed back unchanged.
    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        if map.contains_key("sa") {
            Ok(Self(map))
        } else {
            Err(map)
        }
    }
}

impl fmt::Display for FlowRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Five-tuple view over a [`FlowRecord`]. Missing keys are `None`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowKey<'a>([Option<&'a Value>; 5]);

impl fmt::Display for FlowKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |v: Option<&Value>| match v {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "?".to_string(),
        };
        let [sa, da, sp, dp, pr] = self.0;
        write!(
            f,
            "{}:{} -> {}:{} ({})",
            part(sa),
            part(sp),
            part(da),
            part(dp),
            part(pr)
        )
    }
}

/// One decoded line of analyzer output.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    /// A network flow
    Flow(FlowRecord),
    /// Any other object, e.g. the analyzer's run metadata line
    Other(Map<String, Value>),
}

impl Record {
    /// Classify a decoded JSON value. Non-objects are not records.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(match FlowRecord::try_from(map) {
                Ok(flow) => Record::Flow(flow),
                Err(other) => Record::Other(other),
            }),
            _ => None,
        }
    }

    pub fn as_flow(&self) -> Option<&FlowRecord> {
        match self {
            Record::Flow(flow) => Some(flow),
            Record::Other(_) => None,
        }
    }

    pub fn is_flow(&self) -> bool {
        matches!(self, Record::Flow(_))
    }
}

impl From<FlowRecord> for Record {
    fn from(flow: FlowRecord) -> Self {
        Record::Flow(flow)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
