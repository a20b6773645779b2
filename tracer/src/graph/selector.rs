//! Graph Selection.
//!
//! Renderers cannot lay out graphs with tens of thousands of nodes, so a
//! built graph is windowed before display: nodes are kept when any of their
//! executions falls inside an instruction-number range (and, optionally,
//! has an allowed type), up to a node budget. Edges survive only when both
//! endpoints do. The source graph is never modified.

use std::collections::{BTreeSet, HashSet};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::{debug, instrument};

use super::persist::{edge_records, EdgeRecord};
use super::{DependencyGraph, EdgeKind, NodeId, NodePayload, TracedInstruction};
use crate::common::InstructionType;
use crate::isa::Disassembler;

/// Default node budget of a selection.
pub const DEFAULT_MAX_NODES: usize = 1000;

/// Which nodes a selection keeps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionFilter {
    /// Smallest instruction number kept (inclusive).
    pub start: u64,
    /// Instruction numbers must be below this, when set.
    pub end: Option<u64>,
    /// Allowed instruction types; `None` allows all.
    pub types: Option<BTreeSet<InstructionType>>,
    pub max_nodes: usize,
}

impl Default for SelectionFilter {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            types: None,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

impl SelectionFilter {
    /// Returns `true` if this single execution satisfies the filter.
    pub fn matches(&self, occurrence: &TracedInstruction) -> bool {
        let record = &occurrence.record;
        if record.number < self.start {
            return false;
        }
        if self.end.is_some_and(|end| record.number >= end) {
            return false;
        }
        match &self.types {
            Some(types) => types.contains(&record.kind),
            None => true,
        }
    }

    /// Returns `true` if any execution represented by `payload` matches.
    pub fn accepts(&self, payload: &NodePayload) -> bool {
        payload.occurrences().iter().any(|occ| self.matches(occ))
    }
}

/// A node of a selection, with its display label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewNode {
    pub id: NodeId,
    /// `"<number>\n<disassembly>"` of the first execution.
    pub label: String,
    pub kind: InstructionType,
    pub payload: NodePayload,
}

impl Serialize for ViewNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("ViewNode", 4)?;
        node.serialize_field("id", &self.id)?;
        node.serialize_field("label", &self.label)?;
        node.serialize_field("type", &self.kind)?;
        node.serialize_field("instruction", &self.payload)?;
        node.end()
    }
}

/// Edge between two selected nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
}

/// The windowed subgraph handed to a renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphView {
    pub nodes: Vec<ViewNode>,
    pub edges: Vec<ViewEdge>,
}

impl GraphView {
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id.as_str() == id)
    }

    /// Edge records with the same ids a saved graph would use.
    pub fn edge_records(&self) -> Vec<EdgeRecord> {
        edge_records(self.edges.iter().map(|e| (&e.source, &e.target, e.kind)))
    }
}

impl Serialize for GraphView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(untagged)]
        enum Element<'a> {
            Node(&'a ViewNode),
            Edge(EdgeRecord),
        }

        let elements: Vec<Element<'_>> = self
            .nodes
            .iter()
            .map(Element::Node)
            .chain(self.edge_records().into_iter().map(Element::Edge))
            .collect();

        let mut view = serializer.serialize_struct("GraphView", 1)?;
        view.serialize_field("elements", &elements)?;
        view.end()
    }
}

/// Selects a window of `graph`, labelling nodes with the default decoder.
pub fn select(graph: &DependencyGraph, filter: &SelectionFilter) -> GraphView {
    select_with(graph, filter, &Disassembler::default())
}

/// Selects a window of `graph`.
///
/// # Arguments
///
/// * `graph` - The graph to window; left untouched.
/// * `filter` - Range, type and budget constraints.
/// * `disasm` - Decoder used for node labels.
///
/// # Returns
///
/// At most `filter.max_nodes` nodes, taken first-fit in graph order, and
/// every edge of `graph` whose endpoints were both taken.
#[instrument(skip_all, fields(start = filter.start, end = ?filter.end))]
pub fn select_with(
    graph: &DependencyGraph,
    filter: &SelectionFilter,
    disasm: &Disassembler,
) -> GraphView {
    let mut view = GraphView::default();
    let mut kept: HashSet<usize> = HashSet::new();

    for (index, node) in graph.nodes().iter().enumerate() {
        if view.nodes.len() >= filter.max_nodes {
            break;
        }
        if !filter.accepts(&node.payload) {
            continue;
        }
        let first = &node.payload.first().record;
        kept.insert(index);
        view.nodes.push(ViewNode {
            id: node.id.clone(),
            label: format!(
                "{}\n{}",
                first.number,
                disasm.disassemble(first.instruction.bits())
            ),
            kind: first.kind,
            payload: node.payload.clone(),
        });
    }

    for edge in graph.edges() {
        if kept.contains(&edge.source) && kept.contains(&edge.target) {
            let (source, target) = graph.endpoints(edge);
            view.edges.push(ViewEdge {
                source: source.clone(),
                target: target.clone(),
                kind: edge.kind,
            });
        }
    }

    debug!(
        nodes = view.nodes.len(),
        edges = view.edges.len(),
        "selection complete"
    );
    view
}
