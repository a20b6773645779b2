//! Register Producer Tracking.
//!
//! Read-after-write bookkeeping for vector registers: for every register
//! the tracker remembers which graph node wrote it last, so a later reader
//! can be linked to exactly that node. Earlier writers are forgotten as
//! soon as a newer one is recorded.

use std::collections::HashMap;

/// Last writer of each vector register seen so far in a build.
#[derive(Clone, Debug, Default)]
pub struct RegisterProducers {
    last_writer: HashMap<u8, usize>,
}

impl RegisterProducers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node index of the most recent writer of `reg`, if any.
    pub fn producer(&self, reg: u8) -> Option<usize> {
        self.last_writer.get(&reg).copied()
    }

    /// Records `node` as the writer of `reg`, replacing any earlier one.
    pub fn record_write(&mut self, reg: u8, node: usize) {
        self.last_writer.insert(reg, node);
    }

    /// Number of registers that currently have a producer.
    pub fn len(&self) -> usize {
        self.last_writer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_writer.is_empty()
    }
}
