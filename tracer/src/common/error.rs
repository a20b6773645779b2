//! Error types.
//!
//! Every stage of the pipeline has its own error enum. None of them are
//! retried: the whole analysis is a deterministic transform of an already
//! captured trace, so a failure is reported to the caller and the stage is
//! abandoned without returning partial output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading or validating a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid trace JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("trace must be a JSON array of instruction records")]
    NotAnArray,

    #[error("trace entry {index} is not an object")]
    NotAnObject { index: usize },

    #[error("trace entry {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("trace entry {index} is malformed: {source}")]
    InvalidRecord {
        index: usize,
        source: serde_json::Error,
    },
}

impl TraceError {
    /// Index of the offending trace entry, if the error concerns one.
    pub fn index(&self) -> Option<usize> {
        match self {
            TraceError::NotAnObject { index }
            | TraceError::MissingField { index, .. }
            | TraceError::InvalidRecord { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Failure while building a graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two nodes resolved to the same identity, e.g. two records sharing a
    /// sequence number in the per-instruction graph.
    #[error("duplicate node id `{0}`")]
    DuplicateNode(String),
}

/// Failure while writing or reconstructing a persisted graph.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to access graph file '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("edge `{edge}` references unknown node `{node}`")]
    DanglingEdge { edge: String, node: String },

    #[error("edge `{edge}` has neither a register nor an edge type")]
    UntypedEdge { edge: String },

    #[error("edge `{edge}` has unknown edge type `{edge_type}`")]
    UnknownEdgeType { edge: String, edge_type: String },

    /// A self-loop, or a second edge of the same kind between one pair.
    #[error("edge `{edge}` is a self-loop or repeats an earlier edge")]
    RejectedEdge { edge: String },

    #[error("node `{node}` claims {count} iterations but lists {len}")]
    IterationCountMismatch {
        node: String,
        count: usize,
        len: usize,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Failure while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
