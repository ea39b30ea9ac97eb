// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Gzip-compressed JSON-lines reading and writing.
//!
//! Decoding is tolerant: lines that are not JSON objects are dropped, and a
//! stream cut short by a killed writer keeps whatever was decoded before
//! the cut.

use crate::record::Record;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{trace, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonlError {
    #[error("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to decode gzip stream: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Decode every record from a gzip JSON-lines stream, in line order.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, JsonlError> {
    let mut lines = BufReader::new(MultiGzDecoder::new(reader));
    let mut records = Vec::new();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        match lines.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => line_no += 1,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                warn!(
                    "gzip stream truncated after line {}, keeping {} records: {}",
                    line_no,
                    records.len(),
                    e
                );
                break;
            }
            Err(e) => return Err(e.into()),
        }

        match parse_line(&buf) {
            Some(record) => records.push(record),
            None => trace!("skipping line {}: not a JSON object", line_no),
        }
    }

    Ok(records)
}

/// Decode a gzip JSON-lines file.
pub fn load(path: &Path) -> Result<Vec<Record>, JsonlError> {
    let file = File::open(path).map_err(|source| JsonlError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(file)
}

/// Encode records as gzip JSON lines.
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<W, JsonlError> {
    let mut encoder = GzEncoder::new(writer, Compression::default());
    for record in records {
        serde_json::to_writer(&mut encoder, record)?;
        encoder.write_all(b"\n")?;
    }
    Ok(encoder.finish()?)
}

/// Write records to a gzip JSON-lines file, replacing any existing file.
pub fn save(path: &Path, records: &[Record]) -> Result<(), JsonlError> {
    let file = File::create(path).map_err(|source| JsonlError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = write_records(BufWriter::new(file), records)?;
    writer.flush()?;
    Ok(())
}

fn parse_line(line: &[u8]) -> Option<Record> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return None;
    }
    serde_json::from_slice(line).ok().and_then(Record::from_value)
}

#[cfg(test)]
#[path = "jsonl_tests.rs"]
mod tests;
