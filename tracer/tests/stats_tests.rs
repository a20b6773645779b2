//! Integration tests for graph statistics.

mod common;

use common::{loop_trace, reg_op, trace};
use rvv_tracer::graph::{GraphBuilder, GraphKind};
use rvv_tracer::stats::GraphStats;

/// Tests the counters of an aggregated loop graph.
#[test]
fn test_aggregated_stats() {
    let graph = GraphBuilder::new(GraphKind::AggregatedDependency)
        .build(&loop_trace(6))
        .unwrap();
    let stats = GraphStats::from_graph(&graph);

    assert_eq!(stats.kind, Some(GraphKind::AggregatedDependency));
    assert_eq!(stats.nodes, 5);
    assert_eq!(stats.edges, 3);
    assert_eq!(stats.register_edges, 3);
    assert_eq!(stats.execution_edges, 0);
    assert_eq!(stats.loop_nodes, 4);
    assert_eq!(stats.executions, 25);
    assert_eq!(stats.max_iterations, 6);
}

/// Tests the counters of an execution-order graph.
#[test]
fn test_execution_stats() {
    let graph = GraphBuilder::new(GraphKind::ExecutionOrder)
        .build(&loop_trace(2))
        .unwrap();
    let stats = GraphStats::from_graph(&graph);
    assert_eq!(stats.execution_edges, 5);
    assert_eq!(stats.register_edges, 0);
}

/// Tests a graph without loops.
#[test]
fn test_straight_line_stats() {
    let trace = trace(vec![reg_op(0, "0x0", Some(1), &[]), reg_op(1, "0x4", None, &[1])]);
    let graph = GraphBuilder::new(GraphKind::Dependency).build(&trace).unwrap();
    let stats = GraphStats::from_graph(&graph);
    assert_eq!(stats.loop_nodes, 0);
    assert_eq!(stats.max_iterations, 1);
    assert_eq!(stats.executions, 2);
    stats.print();
}
