//! Instruction Graphs.
//!
//! A [`DependencyGraph`] is built once by a single forward pass over a trace
//! and is read-only afterwards. Nodes and edges are stored in insertion
//! order; edges address their endpoints by node index.
//!
//! Three variants share the same representation (see [`GraphKind`]):
//!
//! * **Dependency**: one node per executed instruction, edges follow vector
//!   register read-after-write dependencies.
//! * **Aggregated dependency**: one node per program counter. Repeated
//!   executions (loop iterations) are folded into an [`IterationGroup`].
//! * **Execution order**: aggregated like the previous variant, but edges
//!   record which program counter followed which.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arch::RvvState;
use crate::common::{GraphError, Pc};
use crate::trace::InstructionRecord;

/// Graph construction.
pub mod builder;

/// Reading and writing graphs as element lists.
pub mod persist;

/// Last-writer tracking for vector registers.
pub mod producers;

/// Windowing and filtering of built graphs.
pub mod selector;

pub use builder::{BuildState, GraphBuilder};
pub use persist::{
    graph_from_str, graph_to_string, graph_to_value, load_graph, save_graph, EdgeRecord,
};
pub use producers::RegisterProducers;
pub use selector::{
    select, select_with, GraphView, SelectionFilter, ViewEdge, ViewNode, DEFAULT_MAX_NODES,
};

/// Graph variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    Dependency,
    AggregatedDependency,
    ExecutionOrder,
}

impl GraphKind {
    /// Returns `true` if nodes are keyed by program counter.
    pub fn aggregates(self) -> bool {
        !matches!(self, GraphKind::Dependency)
    }

    pub fn name(self) -> &'static str {
        match self {
            GraphKind::Dependency => "standard",
            GraphKind::AggregatedDependency => "aggregated",
            GraphKind::ExecutionOrder => "execution",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of a node: `instr_<number>` or `pc_<pc>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn for_instruction(number: u64) -> Self {
        NodeId(format!("instr_{}", number))
    }

    pub fn for_pc(pc: &Pc) -> Self {
        NodeId(format!("pc_{}", pc))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One executed instruction together with the vector state right after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracedInstruction {
    #[serde(flatten)]
    pub record: InstructionRecord,
    #[serde(default)]
    pub rvv_state: RvvState,
}

/// Every execution of one program counter.
///
/// `iterations[0]` is the first execution and `iteration_count` always
/// equals `iterations.len()` for groups created by the builder. Groups read
/// back from disk are checked by the loader.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationGroup {
    #[serde(flatten)]
    first: TracedInstruction,
    iterations: Vec<TracedInstruction>,
    iteration_count: usize,
}

impl IterationGroup {
    /// Starts a group from the first two executions.
    pub fn new(first: TracedInstruction, second: TracedInstruction) -> Self {
        Self {
            iterations: vec![first.clone(), second],
            first,
            iteration_count: 2,
        }
    }

    pub fn push(&mut self, occurrence: TracedInstruction) {
        self.iterations.push(occurrence);
        self.iteration_count += 1;
    }

    pub fn first(&self) -> &TracedInstruction {
        &self.first
    }

    pub fn iterations(&self) -> &[TracedInstruction] {
        &self.iterations
    }

    pub fn iteration_count(&self) -> usize {
        self.iteration_count
    }
}

/// Node contents: a single execution, or a folded loop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodePayload {
    Group(IterationGroup),
    Single(TracedInstruction),
}

impl NodePayload {
    /// The first execution represented by this node.
    pub fn first(&self) -> &TracedInstruction {
        match self {
            NodePayload::Single(occurrence) => occurrence,
            NodePayload::Group(group) => group.first(),
        }
    }

    /// Every execution represented by this node, in trace order.
    pub fn occurrences(&self) -> &[TracedInstruction] {
        match self {
            NodePayload::Single(occurrence) => std::slice::from_ref(occurrence),
            NodePayload::Group(group) => group.iterations(),
        }
    }

    pub fn iteration_count(&self) -> usize {
        match self {
            NodePayload::Single(_) => 1,
            NodePayload::Group(group) => group.iteration_count(),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, NodePayload::Group(_))
    }

    /// Adds another execution, promoting a single record to a group.
    ///
    /// Returns `true` if this call performed the promotion.
    pub fn absorb(&mut self, occurrence: TracedInstruction) -> bool {
        match self {
            NodePayload::Group(group) => {
                group.push(occurrence);
                false
            }
            NodePayload::Single(first) => {
                let group = IterationGroup::new(first.clone(), occurrence);
                *self = NodePayload::Group(group);
                true
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    pub id: NodeId,
    pub payload: NodePayload,
}

/// Why two nodes are connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// The target reads the vector register the source wrote last.
    RegisterDependency(u8),
    /// The target executed immediately after the source.
    ExecutionOrder,
}

/// Directed edge between two node indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GraphEdge {
    pub source: usize,
    pub target: usize,
    pub kind: EdgeKind,
}

/// Nodes and edges of one graph variant.
#[derive(Clone, Debug)]
pub struct DependencyGraph {
    kind: GraphKind,
    nodes: Vec<GraphNode>,
    index: HashMap<NodeId, usize>,
    edges: Vec<GraphEdge>,
    edge_set: HashSet<GraphEdge>,
}

impl DependencyGraph {
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            edge_set: HashSet::new(),
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, index: usize) -> Option<&GraphNode> {
        self.nodes.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&GraphNode> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    /// Appends a node.
    ///
    /// # Returns
    ///
    /// The index of the new node, or `GraphError::DuplicateNode` if a node
    /// with the same id already exists.
    pub fn add_node(&mut self, id: NodeId, payload: NodePayload) -> Result<usize, GraphError> {
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id.to_string()));
        }
        let index = self.nodes.len();
        self.index.insert(id.clone(), index);
        self.nodes.push(GraphNode { id, payload });
        Ok(index)
    }

    pub(crate) fn payload_mut(&mut self, index: usize) -> Option<&mut NodePayload> {
        self.nodes.get_mut(index).map(|n| &mut n.payload)
    }

    /// Adds an edge unless it is a self-loop, refers to a missing node, or
    /// an identical edge already exists.
    ///
    /// Returns `true` if the edge was added.
    pub fn add_edge(&mut self, source: usize, target: usize, kind: EdgeKind) -> bool {
        if source == target || source >= self.nodes.len() || target >= self.nodes.len() {
            return false;
        }
        let edge = GraphEdge {
            source,
            target,
            kind,
        };
        if !self.edge_set.insert(edge) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Returns `true` if an edge of `kind` connects the two named nodes.
    pub fn has_edge(&self, source: &str, target: &str, kind: EdgeKind) -> bool {
        match (self.index_of(source), self.index_of(target)) {
            (Some(source), Some(target)) => self.edge_set.contains(&GraphEdge {
                source,
                target,
                kind,
            }),
            _ => false,
        }
    }

    /// Ids of the two endpoints of `edge`.
    pub fn endpoints(&self, edge: &GraphEdge) -> (&NodeId, &NodeId) {
        (&self.nodes[edge.source].id, &self.nodes[edge.target].id)
    }
}
