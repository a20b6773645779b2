//! RISC-V vector architectural state.
//!
//! This module contains the running vector CSR state replayed from a trace
//! and the decoders for the packed `vtype` and `vcsr` registers.

/// Vector CSR snapshot and the tracker that maintains it.
pub mod state;

/// `vcsr` decoding (saturation flag and rounding mode).
pub mod vcsr;

/// `vtype` decoding with a configurable bit layout.
pub mod vtype;

pub use state::{RvvState, StateTracker};
pub use vcsr::{decode_vcsr, decode_vcsr_text, RoundingMode, VcsrFields};
pub use vtype::{
    decode_vtype, decode_vtype_text, decode_vtype_with, ElementWidth, FractionalLmul,
    LengthMultiplier, VtypeFields, VtypeLayout,
};
