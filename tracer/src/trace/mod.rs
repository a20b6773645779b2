//! Instruction traces.
//!
//! A [`Trace`] is the ordered list of executed vector instructions the
//! graphs are built from. It is produced by the [`loader`] and never
//! modified afterwards.

/// Reading and structural validation of JSON traces.
pub mod loader;

/// The per-instruction record type.
pub mod record;

pub use loader::{load_trace, parse_trace, trace_from_value};
pub use record::InstructionRecord;

/// An ordered, validated sequence of instruction records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
    records: Vec<InstructionRecord>,
}

impl Trace {
    pub fn new(records: Vec<InstructionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[InstructionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstructionRecord> {
        self.records.iter()
    }
}

impl From<Vec<InstructionRecord>> for Trace {
    fn from(records: Vec<InstructionRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a InstructionRecord;
    type IntoIter = std::slice::Iter<'a, InstructionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
