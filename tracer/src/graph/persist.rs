//! Graph Persistence.
//!
//! Graphs are stored as a flat element list, the shape graph renderers
//! consume directly:
//!
//! ```json
//! { "graph_kind": "execution_order", "elements": [
//!     { "id": "pc_0x1000", "instruction": { "number": 0, "pc": "0x1000", ... } },
//!     { "id": "pc_0x1000-pc_0x1004", "source": "pc_0x1000", "target": "pc_0x1004",
//!       "edge_type": "execution_order" }
//! ] }
//! ```
//!
//! An element with a `source` key is an edge; anything else is a node.
//! Dependency edges carry `register`, execution-order edges carry
//! `edge_type`. `graph_kind` is optional on input; elements wrapped as
//! `{ "data": { ... } }` are accepted too. Reconstruction is all-or-nothing: any inconsistency rejects the
//! whole document.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use super::{DependencyGraph, EdgeKind, GraphKind, NodeId, NodePayload};
use crate::common::PersistError;

pub(crate) const EXECUTION_ORDER: &str = "execution_order";

#[derive(Serialize)]
struct NodeRecord<'a> {
    id: &'a NodeId,
    instruction: &'a NodePayload,
}

#[derive(Deserialize)]
struct OwnedNodeRecord {
    id: NodeId,
    instruction: NodePayload,
}

/// Serialized form of one edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
}

impl EdgeRecord {
    fn kind(&self) -> Result<EdgeKind, PersistError> {
        match (&self.edge_type, self.register) {
            (Some(edge_type), _) if edge_type == EXECUTION_ORDER => Ok(EdgeKind::ExecutionOrder),
            (Some(edge_type), _) => Err(PersistError::UnknownEdgeType {
                edge: self.id.clone(),
                edge_type: edge_type.clone(),
            }),
            (None, Some(reg)) => Ok(EdgeKind::RegisterDependency(reg)),
            (None, None) => Err(PersistError::UntypedEdge {
                edge: self.id.clone(),
            }),
        }
    }
}

/// Builds edge records with ids unique within one element list.
///
/// The id is `<source>-<target>`; a second edge between the same pair gets
/// a `#2` suffix, the third `#3`, and so on.
pub(crate) fn edge_records<'a, I>(edges: I) -> Vec<EdgeRecord>
where
    I: IntoIterator<Item = (&'a NodeId, &'a NodeId, EdgeKind)>,
{
    let mut seen: HashMap<(&NodeId, &NodeId), usize> = HashMap::new();
    edges
        .into_iter()
        .map(|(source, target, kind)| {
            let count = seen.entry((source, target)).or_insert(0);
            *count += 1;
            let id = if *count == 1 {
                format!("{}-{}", source, target)
            } else {
                format!("{}-{}#{}", source, target, count)
            };
            let (register, edge_type) = match kind {
                EdgeKind::RegisterDependency(reg) => (Some(reg), None),
                EdgeKind::ExecutionOrder => (None, Some(EXECUTION_ORDER.to_string())),
            };
            EdgeRecord {
                id,
                source: source.clone(),
                target: target.clone(),
                register,
                edge_type,
            }
        })
        .collect()
}

#[derive(Serialize)]
struct Document<E> {
    graph_kind: GraphKind,
    elements: Vec<E>,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    graph_kind: Option<GraphKind>,
    elements: Vec<Value>,
}

/// Converts a graph to its element list.
pub fn graph_to_value(graph: &DependencyGraph) -> Result<Value, PersistError> {
    let mut elements = Vec::with_capacity(graph.node_count() + graph.edge_count());
    for node in graph.nodes() {
        elements.push(serde_json::to_value(NodeRecord {
            id: &node.id,
            instruction: &node.payload,
        })?);
    }
    let edges = edge_records(graph.edges().iter().map(|edge| {
        let (source, target) = graph.endpoints(edge);
        (source, target, edge.kind)
    }));
    for edge in edges {
        elements.push(serde_json::to_value(edge)?);
    }
    Ok(serde_json::to_value(Document {
        graph_kind: graph.kind(),
        elements,
    })?)
}

/// Serializes a graph as pretty-printed JSON.
pub fn graph_to_string(graph: &DependencyGraph) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(&graph_to_value(graph)?)?)
}

/// Writes a graph file.
#[instrument(skip_all, fields(kind = %graph.kind()))]
pub fn save_graph(path: impl AsRef<Path>, graph: &DependencyGraph) -> Result<(), PersistError> {
    let path = path.as_ref();
    let text = graph_to_string(graph)?;
    fs::write(path, text).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "graph written");
    Ok(())
}

/// Reads a graph file.
#[instrument(skip_all)]
pub fn load_graph(path: impl AsRef<Path>) -> Result<DependencyGraph, PersistError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading graph");
    let text = fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    graph_from_str(&text)
}

/// Reconstructs a graph from its serialized element list.
///
/// The variant comes from `graph_kind`. Files without it are inferred: any
/// execution-order edge means [`GraphKind::ExecutionOrder`], `instr_` node
/// ids mean [`GraphKind::Dependency`], anything else is treated as the
/// aggregated dependency graph.
pub fn graph_from_str(text: &str) -> Result<DependencyGraph, PersistError> {
    let document: RawDocument = serde_json::from_str(text)?;

    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    for element in document.elements {
        let element = unwrap_data(element);
        if element.get("source").is_some() {
            edges.push(serde_json::from_value::<EdgeRecord>(element)?);
        } else {
            nodes.push(serde_json::from_value::<OwnedNodeRecord>(element)?);
        }
    }

    let mut kinds = Vec::with_capacity(edges.len());
    for edge in &edges {
        kinds.push(edge.kind()?);
    }
    let kind = document
        .graph_kind
        .unwrap_or_else(|| infer_kind(&nodes, &kinds));

    let mut graph = DependencyGraph::new(kind);
    for node in nodes {
        let count = node.instruction.iteration_count();
        let len = node.instruction.occurrences().len();
        if count != len {
            return Err(PersistError::IterationCountMismatch {
                node: node.id.to_string(),
                count,
                len,
            });
        }
        graph.add_node(node.id, node.instruction)?;
    }

    for (edge, kind) in edges.iter().zip(kinds) {
        let source = endpoint(&graph, edge, &edge.source)?;
        let target = endpoint(&graph, edge, &edge.target)?;
        if !graph.add_edge(source, target, kind) {
            return Err(PersistError::RejectedEdge {
                edge: edge.id.clone(),
            });
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        kind = %graph.kind(),
        "graph reconstructed"
    );
    Ok(graph)
}

/// Strips a `{ "data": { ... } }` wrapper.
fn unwrap_data(element: Value) -> Value {
    match element {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn endpoint(
    graph: &DependencyGraph,
    edge: &EdgeRecord,
    node: &NodeId,
) -> Result<usize, PersistError> {
    graph
        .index_of(node.as_str())
        .ok_or_else(|| PersistError::DanglingEdge {
            edge: edge.id.clone(),
            node: node.to_string(),
        })
}

fn infer_kind(nodes: &[OwnedNodeRecord], kinds: &[EdgeKind]) -> GraphKind {
    if kinds.contains(&EdgeKind::ExecutionOrder) {
        GraphKind::ExecutionOrder
    } else if nodes.is_empty() || nodes.iter().any(|n| n.id.as_str().starts_with("instr_")) {
        GraphKind::Dependency
    } else {
        GraphKind::AggregatedDependency
    }
}
