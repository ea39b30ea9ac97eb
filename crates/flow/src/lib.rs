// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Flow record model and gzip JSON-lines codec.
//!
//! The analyzer under test writes one JSON object per line into a gzip
//! stream. Most lines describe a network flow; a few carry run metadata.
//! This crate turns those streams into [`Record`] values and back.

pub mod jsonl;
mod record;
mod version;

pub use jsonl::JsonlError;
pub use record::{FlowKey, FlowRecord, Record, COMPARE_KEYS};
pub use version::{ProtocolVersion, UnknownVersion};
