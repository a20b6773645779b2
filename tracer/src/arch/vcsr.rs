//! `vcsr` CSR decoding.
//!
//! `vcsr` mirrors the fixed-point saturation flag (`vxsat`, bit 0) and the
//! fixed-point rounding mode (`vxrm`, bits 2:1).

use std::fmt;

use crate::common::{parse_word, Word};

/// Fixed-point rounding mode (`vxrm`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round to nearest, ties up.
    Rnu = 0,
    /// Round to nearest, ties to even.
    Rne = 1,
    /// Round down (truncate).
    Rdn = 2,
    /// Round to odd (jam).
    Rod = 3,
}

impl RoundingMode {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0 => RoundingMode::Rnu,
            1 => RoundingMode::Rne,
            2 => RoundingMode::Rdn,
            _ => RoundingMode::Rod,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            RoundingMode::Rnu => "rnu",
            RoundingMode::Rne => "rne",
            RoundingMode::Rdn => "rdn",
            RoundingMode::Rod => "rod",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RoundingMode::Rnu => "round-to-nearest-up",
            RoundingMode::Rne => "round-to-nearest-even",
            RoundingMode::Rdn => "round-down",
            RoundingMode::Rod => "round-to-odd",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.mnemonic(), self.description())
    }
}

/// Decoded `vcsr` fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VcsrFields {
    pub vxsat: bool,
    pub vxrm: RoundingMode,
}

impl VcsrFields {
    pub fn decode(raw: u64) -> Self {
        Self {
            vxsat: raw & 0x1 != 0,
            vxrm: RoundingMode::from_bits(((raw >> 1) & 0x3) as u8),
        }
    }

    /// Field names paired with their display values.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let vxsat = if self.vxsat {
            "saturated"
        } else {
            "no saturation"
        };
        vec![
            ("vxsat", vxsat.to_string()),
            ("vxrm", self.vxrm.to_string()),
        ]
    }
}

/// Decodes an optional `vcsr` value; an unset value yields `None`.
pub fn decode_vcsr(raw: Option<Word>) -> Option<VcsrFields> {
    raw.map(|w| VcsrFields::decode(w.val()))
}

/// Decodes a textual `vcsr` value in hex; non-numeric text yields `None`.
pub fn decode_vcsr_text(text: &str) -> Option<VcsrFields> {
    parse_word(text).map(VcsrFields::decode)
}
