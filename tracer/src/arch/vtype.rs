//! `vtype` CSR decoding.
//!
//! The packed `vtype` value selects the element width (`vsew`), the
//! register group multiplier (`vlmul`), the tail/mask policies and the
//! illegal-configuration flag. Traces in the wild disagree on two details
//! of the layout (where `vill` lives and how the fractional multipliers are
//! numbered), so the positions are carried in an explicit [`VtypeLayout`]
//! rather than hard-coded into the decoder.

use std::fmt;

use crate::common::{parse_word, Word};

/// Numbering of the fractional `vlmul` encodings 5, 6 and 7.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FractionalLmul {
    /// 5 → 1/2, 6 → 1/4, 7 → 1/8.
    HalfFirst,
    /// 5 → 1/8, 6 → 1/4, 7 → 1/2.
    EighthFirst,
}

/// Bit layout used to decode `vtype` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VtypeLayout {
    pub vill_bit: u32,
    pub vma_bit: u32,
    pub vta_bit: u32,
    pub fractional: FractionalLmul,
}

impl VtypeLayout {
    /// The layout the trace viewer has always displayed: `vill` and `vma`
    /// both read from bit 7, fractional multipliers numbered from 1/2.
    pub const TRACE_VIEWER: VtypeLayout = VtypeLayout {
        vill_bit: 7,
        vma_bit: 7,
        vta_bit: 6,
        fractional: FractionalLmul::HalfFirst,
    };

    /// The ratified RVV 1.0 layout for a 64-bit `vtype`.
    pub const RVV_1_0: VtypeLayout = VtypeLayout {
        vill_bit: 63,
        vma_bit: 7,
        vta_bit: 6,
        fractional: FractionalLmul::EighthFirst,
    };

    /// Looks up a preset by its configuration name.
    pub fn from_name(name: &str) -> Option<VtypeLayout> {
        match name {
            "trace-viewer" => Some(VtypeLayout::TRACE_VIEWER),
            "rvv-1.0" => Some(VtypeLayout::RVV_1_0),
            _ => None,
        }
    }

    /// Decodes a packed `vtype` value.
    ///
    /// # Arguments
    ///
    /// * `raw` - The `vtype` CSR value as captured in the trace.
    ///
    /// # Returns
    ///
    /// The decoded fields. Unassigned `vsew`/`vlmul` encodings decode to
    /// their `Reserved` variants; decoding never fails.
    pub fn decode(&self, raw: u64) -> VtypeFields {
        VtypeFields {
            vill: bit(raw, self.vill_bit),
            vma: bit(raw, self.vma_bit),
            vta: bit(raw, self.vta_bit),
            vsew: ElementWidth::from_bits(((raw >> 3) & 0x7) as u8),
            vlmul: self.lmul((raw & 0x7) as u8),
        }
    }

    /// Maps a 3-bit `vlmul` encoding to its multiplier.
    pub fn lmul(&self, encoding: u8) -> LengthMultiplier {
        match (encoding, self.fractional) {
            (0..=3, _) => LengthMultiplier::Whole(1 << encoding),
            (5, FractionalLmul::HalfFirst) | (7, FractionalLmul::EighthFirst) => {
                LengthMultiplier::Fraction(2)
            }
            (6, _) => LengthMultiplier::Fraction(4),
            (7, FractionalLmul::HalfFirst) | (5, FractionalLmul::EighthFirst) => {
                LengthMultiplier::Fraction(8)
            }
            (other, _) => LengthMultiplier::Reserved(other),
        }
    }
}

impl Default for VtypeLayout {
    fn default() -> Self {
        VtypeLayout::TRACE_VIEWER
    }
}

fn bit(raw: u64, pos: u32) -> bool {
    raw.checked_shr(pos).unwrap_or(0) & 1 != 0
}

/// Selected element width (`vsew`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementWidth {
    /// Element width in bits: 8, 16, 32 or 64.
    Bits(u16),
    Reserved(u8),
}

impl ElementWidth {
    pub fn from_bits(encoding: u8) -> Self {
        match encoding {
            0..=3 => ElementWidth::Bits(8 << encoding),
            other => ElementWidth::Reserved(other),
        }
    }

    /// Assembler spelling, e.g. `e32`.
    pub fn mnemonic(self) -> String {
        match self {
            ElementWidth::Bits(bits) => format!("e{}", bits),
            ElementWidth::Reserved(enc) => format!("e?{}", enc),
        }
    }
}

impl fmt::Display for ElementWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementWidth::Bits(bits) => write!(f, "{}-bit", bits),
            ElementWidth::Reserved(enc) => write!(f, "reserved({})", enc),
        }
    }
}

/// Register group multiplier (`vlmul`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthMultiplier {
    /// Integral multiplier: 1, 2, 4 or 8.
    Whole(u8),
    /// Fractional multiplier `1/n` with `n` in 2, 4, 8.
    Fraction(u8),
    Reserved(u8),
}

impl LengthMultiplier {
    /// Assembler spelling, e.g. `m2` or `mf4`.
    pub fn mnemonic(self) -> String {
        match self {
            LengthMultiplier::Whole(n) => format!("m{}", n),
            LengthMultiplier::Fraction(n) => format!("mf{}", n),
            LengthMultiplier::Reserved(enc) => format!("m?{}", enc),
        }
    }
}

impl fmt::Display for LengthMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthMultiplier::Whole(n) => write!(f, "{}", n),
            LengthMultiplier::Fraction(n) => write!(f, "1/{}", n),
            LengthMultiplier::Reserved(enc) => write!(f, "reserved({})", enc),
        }
    }
}

/// Decoded `vtype` fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VtypeFields {
    pub vill: bool,
    pub vma: bool,
    pub vta: bool,
    pub vsew: ElementWidth,
    pub vlmul: LengthMultiplier,
}

impl VtypeFields {
    /// Field names paired with their display values, in register order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("vill", if self.vill { "illegal" } else { "legal" }.to_string()),
            ("vma", policy(self.vma).to_string()),
            ("vta", policy(self.vta).to_string()),
            ("vsew", self.vsew.to_string()),
            ("vlmul", self.vlmul.to_string()),
        ]
    }
}

fn policy(agnostic: bool) -> &'static str {
    if agnostic {
        "agnostic"
    } else {
        "undisturbed"
    }
}

/// Decodes an optional `vtype` value with the default layout.
///
/// An unset value yields `None`.
pub fn decode_vtype(raw: Option<Word>) -> Option<VtypeFields> {
    decode_vtype_with(&VtypeLayout::default(), raw)
}

/// Decodes an optional `vtype` value with an explicit layout.
pub fn decode_vtype_with(layout: &VtypeLayout, raw: Option<Word>) -> Option<VtypeFields> {
    raw.map(|w| layout.decode(w.val()))
}

/// Decodes a textual `vtype` value (`"0xd0"` or `"d0"`).
///
/// Text that is not a number yields `None`.
pub fn decode_vtype_text(layout: &VtypeLayout, text: &str) -> Option<VtypeFields> {
    parse_word(text).map(|raw| layout.decode(raw))
}
