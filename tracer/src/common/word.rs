//! Numeric words carried by trace records.
//!
//! Trace producers are inconsistent about how they write numbers: CSR
//! values and instruction encodings show up both as JSON integers and as
//! hex strings, with or without a prefix (`"0x57"`, `"57"`). Both newtypes
//! here accept either form.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Parses a hexadecimal number; the `0x` prefix is optional.
///
/// Strings are always hex, so `"10"` is sixteen. Returns `None` for
/// anything else, including an empty string.
pub fn parse_word(text: &str) -> Option<u64> {
    let text = text.trim();
    let hex = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if hex.starts_with('+') {
        return None;
    }
    u64::from_str_radix(hex, 16).ok()
}

struct WordVisitor;

impl Visitor<'_> for WordVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or a hex string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
        u64::try_from(v).map_err(|_| E::custom(format!("negative value {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
        parse_word(v).ok_or_else(|| E::custom(format!("invalid number '{}'", v)))
    }
}

/// A CSR value such as `vl` or `vtype`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(pub u64);

impl Word {
    pub fn val(self) -> u64 {
        self.0
    }
}

impl From<u64> for Word {
    fn from(v: u64) -> Self {
        Word(v)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Word {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for Word {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WordVisitor).map(Word)
    }
}

/// A raw 32-bit instruction encoding.
///
/// Serialized as lowercase `0x` hex, the form the trace producer uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstructionWord(pub u32);

impl InstructionWord {
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstructionWord {
    fn from(v: u32) -> Self {
        InstructionWord(v)
    }
}

impl fmt::Display for InstructionWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl Serialize for InstructionWord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InstructionWord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = deserializer.deserialize_any(WordVisitor)?;
        u32::try_from(raw)
            .map(InstructionWord)
            .map_err(|_| de::Error::custom(format!("instruction {:#x} wider than 32 bits", raw)))
    }
}
