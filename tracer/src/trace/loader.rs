//! Trace Loader.
//!
//! Reads a JSON trace (an array of instruction records) from disk or from
//! memory and validates its structure. Validation is all-or-nothing: the
//! first malformed entry aborts the load and is reported by index, since
//! every later record may depend on state established by the earlier ones.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

use super::record::{InstructionRecord, REQUIRED_FIELDS};
use super::Trace;
use crate::common::TraceError;

/// Loads and validates a trace file.
#[instrument(skip_all)]
pub fn load_trace(path: impl AsRef<Path>) -> Result<Trace, TraceError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading trace");
    let text = fs::read_to_string(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_trace(&text)
}

/// Parses and validates a trace held in memory.
pub fn parse_trace(text: &str) -> Result<Trace, TraceError> {
    let value: Value = serde_json::from_str(text)?;
    trace_from_value(value)
}

/// Validates an already parsed JSON document as a trace.
pub fn trace_from_value(value: Value) -> Result<Trace, TraceError> {
    let Value::Array(entries) = value else {
        return Err(TraceError::NotAnArray);
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        records.push(record_from_value(index, entry)?);
    }

    debug!(records = records.len(), "trace validated");
    Ok(Trace::new(records))
}

fn record_from_value(index: usize, entry: Value) -> Result<InstructionRecord, TraceError> {
    let Some(fields) = entry.as_object() else {
        return Err(TraceError::NotAnObject { index });
    };

    for field in REQUIRED_FIELDS {
        match fields.get(field) {
            None | Some(Value::Null) => return Err(TraceError::MissingField { index, field }),
            Some(_) => {}
        }
    }

    serde_json::from_value(entry).map_err(|source| TraceError::InvalidRecord { index, source })
}
