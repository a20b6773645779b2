//! RISC-V Vector Trace Analyzer Library.
//!
//! This crate turns a trace of executed RISC-V "V" extension instructions into
//! graphs that show how the instructions depend on each other, and decodes
//! the packed vector CSRs and instruction words those traces carry.
//!
//! # Pipeline
//!
//! * **Load**: read a JSON trace and validate every record.
//! * **Build**: replay the trace once, tracking the vector CSR state, and
//!   produce a per-instruction dependency graph, a per-PC aggregated graph or
//!   an execution-order graph.
//! * **Persist**: write the graph as an element list and read it back.
//! * **Select**: window a graph by instruction number and type for display.
//!
//! # Modules
//!
//! * `arch`: Vector CSR state tracking and `vtype`/`vcsr` decoding.
//! * `common`: Shared types, numeric words, and error handling.
//! * `config`: Configuration loading and parsing.
//! * `graph`: Graph model, builder, selector, and persistence.
//! * `isa`: Instruction field extraction and the vector disassembler.
//! * `stats`: Graph statistics.
//! * `trace`: Trace records and the trace loader.

/// Vector architectural state and CSR bitfield decoders.
///
/// Tracks `vl`, `vtype`, `vstart`, `vcsr` and `vlenb` while a trace is
/// replayed and decodes `vtype`/`vcsr` values into named fields.
pub mod arch;

/// Shared types, numeric words, and error types.
pub mod common;

/// Configuration of output paths, enabled graphs, selection defaults and
/// decoder layout, loaded from TOML.
pub mod config;

/// Dependency and execution-order graphs.
///
/// Builds the three graph variants in a single pass, windows them for
/// display, and converts them to and from their persisted element list.
pub mod graph;

/// Instruction Set Architecture definitions and the vector disassembler.
pub mod isa;

/// Graph statistics collection and reporting.
pub mod stats;

/// Trace records and loading.
pub mod trace;
