//! Common types used throughout the trace analyzer.
//!
//! This module provides the instruction classification shared by the trace
//! reader, the graph builder and the selector, the numeric word types used
//! for raw instruction encodings and CSR values, and the error types of
//! every stage.

/// Instruction classification and program-counter keys.
pub mod data;

/// Error types for trace loading, graph building, persistence and config.
pub mod error;

/// Numeric words that accept both integer and textual JSON encodings.
pub mod word;

pub use data::{InstructionType, Pc};
pub use error::{ConfigError, GraphError, PersistError, TraceError};
pub use word::{parse_word, InstructionWord, Word};
