//! Trace Records.
//!
//! One [`InstructionRecord`] describes a single executed instruction as
//! captured by the trace producer: where it was fetched from, how it was
//! encoded, which operands it touched (together with the operand values)
//! and, for vector CSR configuration instructions, the CSR values it left
//! behind.
//!
//! Optional fields that are absent from the trace stay `None`. They are
//! never defaulted to zero, since a fabricated `vd = 0` would create
//! dependency edges that did not happen.

use serde::{Deserialize, Serialize};

use crate::common::{InstructionType, InstructionWord, Pc, Word};

/// Required keys of every trace entry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 4] = ["number", "pc", "instruction", "type"];

/// A single executed instruction from the trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionRecord {
    /// Monotonic sequence index assigned by the trace producer.
    pub number: u64,
    pub pc: Pc,
    pub instruction: InstructionWord,
    #[serde(rename = "type")]
    pub kind: InstructionType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rd: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rs1: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rs2: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rd_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rs1_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rs2_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vd: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vs1: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vs2: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vd_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vs1_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vs2_data: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vl: Option<Word>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vtype: Option<Word>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vstart: Option<Word>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcsr: Option<Word>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlenb: Option<Word>,
}

impl InstructionRecord {
    /// Creates a record with only the required fields set.
    pub fn new(number: u64, pc: Pc, instruction: u32, kind: InstructionType) -> Self {
        Self {
            number,
            pc,
            instruction: InstructionWord(instruction),
            kind,
            rd: None,
            rs1: None,
            rs2: None,
            rd_value: None,
            rs1_value: None,
            rs2_value: None,
            vd: None,
            vs1: None,
            vs2: None,
            vd_data: None,
            vs1_data: None,
            vs2_data: None,
            vl: None,
            vtype: None,
            vstart: None,
            vcsr: None,
            vlenb: None,
        }
    }

    /// Vector registers read by this instruction.
    ///
    /// `vs1` comes before `vs2`; a register named by both is reported once.
    pub fn vector_sources(&self) -> Vec<u8> {
        let mut sources = Vec::with_capacity(2);
        for reg in [self.vs1, self.vs2].into_iter().flatten() {
            if !sources.contains(&reg) {
                sources.push(reg);
            }
        }
        sources
    }

    /// Vector registers written by this instruction.
    pub fn vector_destinations(&self) -> Vec<u8> {
        self.vd.into_iter().collect()
    }

    pub fn is_csr_config(&self) -> bool {
        self.kind == InstructionType::VectorCsr
    }
}
