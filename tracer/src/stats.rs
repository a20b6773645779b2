//! Graph statistics collection and reporting.
//!
//! Summarizes a built graph: node and edge counts broken down by edge kind,
//! how many nodes stand for folded loops, and the hottest loop.

use crate::graph::{DependencyGraph, EdgeKind, GraphKind};

/// Summary counters of one graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub kind: Option<GraphKind>,
    pub nodes: usize,
    pub edges: usize,
    pub register_edges: usize,
    pub execution_edges: usize,

    /// Nodes holding more than one execution.
    pub loop_nodes: usize,
    /// Total executions represented by all nodes.
    pub executions: usize,
    /// Largest iteration count of any node (1 for a graph without loops).
    pub max_iterations: usize,
}

impl GraphStats {
    pub fn from_graph(graph: &DependencyGraph) -> Self {
        let mut stats = GraphStats {
            kind: Some(graph.kind()),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            ..Default::default()
        };

        for edge in graph.edges() {
            match edge.kind {
                EdgeKind::RegisterDependency(_) => stats.register_edges += 1,
                EdgeKind::ExecutionOrder => stats.execution_edges += 1,
            }
        }

        for node in graph.nodes() {
            let count = node.payload.iteration_count();
            stats.executions += count;
            stats.max_iterations = stats.max_iterations.max(count);
            if node.payload.is_group() {
                stats.loop_nodes += 1;
            }
        }
        stats
    }

    /// Prints an aligned summary to stdout.
    pub fn print(&self) {
        let kind = self.kind.map_or("unknown", GraphKind::name);
        println!("  graph_kind               {}", kind);
        println!("  nodes                    {}", self.nodes);
        println!("  edges                    {}", self.edges);
        println!("    register               {}", self.register_edges);
        println!("    execution_order        {}", self.execution_edges);
        println!("  executions               {}", self.executions);
        println!("  loop_nodes               {}", self.loop_nodes);
        println!("  max_iterations           {}", self.max_iterations);
    }
}
