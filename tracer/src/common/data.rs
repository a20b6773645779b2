//! Instruction Classification.
//!
//! This module defines how trace entries are classified by the trace
//! producer, and the opaque program-counter key used to fold loop
//! iterations together.

use std::fmt;

use clap::ValueEnum;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Class of an executed vector instruction.
///
/// The numeric values are the ones the trace producer writes into the
/// `type` field of every record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
#[repr(u8)]
pub enum InstructionType {
    /// Register-register vector operation.
    #[value(name = "reg")]
    RegReg = 1,

    /// Vector CSR configuration (`vset{i}vl{i}` and friends).
    ///
    /// Only records of this class carry `vl`, `vtype`, `vstart`, `vcsr`
    /// and `vlenb`, and only they update the tracked vector state.
    #[value(name = "csr")]
    VectorCsr = 2,

    /// Vector load or store.
    #[value(name = "ls")]
    LoadStore = 3,
}

impl InstructionType {
    /// Short name used on the command line and in configuration files.
    pub fn short_name(self) -> &'static str {
        match self {
            InstructionType::RegReg => "reg",
            InstructionType::VectorCsr => "csr",
            InstructionType::LoadStore => "ls",
        }
    }
}

impl TryFrom<u8> for InstructionType {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(InstructionType::RegReg),
            2 => Ok(InstructionType::VectorCsr),
            3 => Ok(InstructionType::LoadStore),
            other => Err(other),
        }
    }
}

impl fmt::Display for InstructionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl Serialize for InstructionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for InstructionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        InstructionType::try_from(raw)
            .map_err(|v| de::Error::custom(format!("unknown instruction type {}", v)))
    }
}

/// Program counter of a trace entry.
///
/// The analyzer never does arithmetic on it; it is only compared for
/// equality to detect repeated executions of the same code location. Both
/// string and integer JSON encodings are accepted and kept as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pc(String);

impl Pc {
    pub fn new(text: impl Into<String>) -> Self {
        Pc(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Pc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct PcVisitor;

impl Visitor<'_> for PcVisitor {
    type Value = Pc;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a program counter as string or integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Pc, E> {
        Ok(Pc::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Pc, E> {
        Ok(Pc(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Pc, E> {
        Ok(Pc(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Pc, E> {
        Ok(Pc(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for Pc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PcVisitor)
    }
}
