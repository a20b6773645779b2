//! Instruction Set Architecture Definitions.
//!
//! Field extraction, opcode constants, register names and the vector
//! disassembler used to label graph nodes.

/// ABI register names.
pub mod abi;

/// Vector instruction disassembler.
pub mod disasm;

/// Bit-field accessors for raw instruction words.
pub mod instruction;

/// Opcode and function-code constants.
pub mod opcodes;

pub use disasm::{disassemble, unknown, Disassembler};
pub use instruction::InstructionBits;
