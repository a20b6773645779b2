//! RISC-V Vector Architectural State.
//!
//! This module tracks the vector CSRs (`vl`, `vtype`, `vstart`, `vcsr`,
//! `vlenb`) while a trace is replayed. Only vector CSR configuration
//! instructions change the state; every other instruction observes the
//! values left behind by the most recent configuration.

use serde::{Deserialize, Serialize};

use crate::common::Word;
use crate::trace::InstructionRecord;

/// Snapshot of the vector CSRs at one point of the trace.
///
/// Each field is independently unset until a configuration instruction in
/// the trace provides it. The type is `Copy`: a snapshot handed out by the
/// tracker can never observe later updates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RvvState {
    /// Vector length.
    #[serde(default)]
    pub vl: Option<Word>,

    /// Vector type (element width, length multiplier, policy bits).
    #[serde(default)]
    pub vtype: Option<Word>,

    /// Index of the first element to execute.
    #[serde(default)]
    pub vstart: Option<Word>,

    /// Fixed-point rounding mode and saturation flag.
    #[serde(default)]
    pub vcsr: Option<Word>,

    /// Vector register length in bytes.
    #[serde(default)]
    pub vlenb: Option<Word>,
}

impl RvvState {
    /// Returns `true` if no field has been configured yet.
    pub fn is_unset(&self) -> bool {
        *self == RvvState::default()
    }
}

/// Running vector state across a trace.
///
/// The tracker is order dependent: it must see records in trace order,
/// and feeding the same record twice is not a no-op once other records
/// were seen in between.
#[derive(Clone, Debug, Default)]
pub struct StateTracker {
    state: RvvState,
}

impl StateTracker {
    /// Creates a tracker with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a trace record to the tracked state.
    ///
    /// # Arguments
    ///
    /// * `record` - The record just executed.
    ///
    /// # Note
    ///
    /// Records that are not vector CSR configuration instructions are
    /// ignored, even if they happen to carry CSR fields. Fields absent from
    /// a configuration record keep their previous value.
    pub fn update(&mut self, record: &InstructionRecord) {
        if !record.is_csr_config() {
            return;
        }

        let fields = [
            (&mut self.state.vl, record.vl),
            (&mut self.state.vtype, record.vtype),
            (&mut self.state.vstart, record.vstart),
            (&mut self.state.vcsr, record.vcsr),
            (&mut self.state.vlenb, record.vlenb),
        ];
        for (slot, value) in fields {
            if value.is_some() {
                *slot = value;
            }
        }
    }

    /// Returns an independent copy of the current state.
    pub fn snapshot(&self) -> RvvState {
        self.state
    }
}
