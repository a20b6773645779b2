//! Integration tests for graph selection.

mod common;

use std::collections::BTreeSet;

use common::{csr_op, load_op, loop_trace, reg_op, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rvv_tracer::arch::VtypeLayout;
use rvv_tracer::common::{InstructionType, InstructionWord};
use rvv_tracer::graph::{
    select, select_with, GraphBuilder, GraphKind, SelectionFilter, DEFAULT_MAX_NODES,
};
use rvv_tracer::isa::Disassembler;

fn only(types: &[InstructionType]) -> Option<BTreeSet<InstructionType>> {
    Some(types.iter().copied().collect())
}

/// Tests the defaults: everything from zero, up to the node budget.
#[test]
fn test_default_filter_keeps_everything() {
    let filter = SelectionFilter::default();
    assert_eq!(filter.max_nodes, DEFAULT_MAX_NODES);

    let graph = GraphBuilder::new(GraphKind::Dependency)
        .build(&loop_trace(2))
        .unwrap();
    let view = select(&graph, &filter);
    assert_eq!(view.nodes.len(), graph.node_count());
    assert_eq!(view.edges.len(), graph.edge_count());
}

/// Tests windowing by number range and type on the per-instruction graph.
#[test]
fn test_range_and_type_window() {
    let records = (0..30)
        .map(|n| match n % 3 {
            0 => reg_op(n, &format!("{:#x}", 4 * n), Some(1), &[1]),
            1 => load_op(n, &format!("{:#x}", 4 * n), 1),
            _ => csr_op(n, &format!("{:#x}", 4 * n), 4, 0xd0),
        })
        .collect();
    let graph = GraphBuilder::new(GraphKind::Dependency)
        .build(&trace(records))
        .unwrap();

    let filter = SelectionFilter {
        start: 10,
        end: Some(20),
        types: only(&[InstructionType::RegReg]),
        ..Default::default()
    };
    let view = select(&graph, &filter);

    let ids: Vec<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["instr_12", "instr_15", "instr_18"]);
    assert!(view
        .nodes
        .iter()
        .all(|n| n.kind == InstructionType::RegReg));
    for edge in &view.edges {
        assert!(view.contains(edge.source.as_str()));
        assert!(view.contains(edge.target.as_str()));
    }
}

/// Tests that an aggregated node is kept when any iteration is in range.
#[test]
fn test_any_occurrence_matches() {
    let graph = GraphBuilder::new(GraphKind::AggregatedDependency)
        .build(&loop_trace(5))
        .unwrap();

    // Numbers 15..17 belong to the fourth iteration of the body only.
    let filter = SelectionFilter {
        start: 15,
        end: Some(17),
        ..Default::default()
    };
    let view = select(&graph, &filter);
    let ids: BTreeSet<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, BTreeSet::from(["pc_0x100c", "pc_0x1010"]));
    assert_eq!(view.edges.len(), 1);

    // The label still shows the first execution.
    let add = view.nodes.iter().find(|n| n.id.as_str() == "pc_0x100c").unwrap();
    assert_eq!(add.label, "3\nvadd.vv v3, v2, v1");
}

/// Tests the node budget: first-fit in graph order.
#[test]
fn test_max_nodes_budget() {
    let graph = GraphBuilder::new(GraphKind::Dependency)
        .build(&loop_trace(10))
        .unwrap();
    let filter = SelectionFilter {
        max_nodes: 4,
        ..Default::default()
    };
    let view = select(&graph, &filter);
    let ids: Vec<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["instr_0", "instr_1", "instr_2", "instr_3"]);
    assert!(view
        .edges
        .iter()
        .all(|e| view.contains(e.source.as_str()) && view.contains(e.target.as_str())));
    assert_eq!(view.edges.len(), 2);

    let none = select(
        &graph,
        &SelectionFilter {
            max_nodes: 0,
            ..Default::default()
        },
    );
    assert!(none.nodes.is_empty());
    assert!(none.edges.is_empty());
}

/// Tests that an empty window yields an empty selection.
#[test]
fn test_empty_window() {
    let graph = GraphBuilder::new(GraphKind::ExecutionOrder)
        .build(&loop_trace(2))
        .unwrap();
    let filter = SelectionFilter {
        start: 1000,
        ..Default::default()
    };
    let view = select(&graph, &filter);
    assert!(view.nodes.is_empty());
    assert!(view.edges.is_empty());
}

/// Tests that labels use the decoder handed in.
#[test]
fn test_labels_follow_layout() {
    let mut rec = csr_op(0, "0x0", 4, 0xd0);
    rec.instruction = InstructionWord((0b11 << 30) | (5 << 20) | (8 << 15) | (7 << 12) | (5 << 7) | 0x57);
    let graph = GraphBuilder::new(GraphKind::Dependency)
        .build(&trace(vec![rec]))
        .unwrap();

    let viewer = select(&graph, &SelectionFilter::default());
    assert_eq!(viewer.nodes[0].label, "0\nvsetivli t0, 8, e8, mf2, tu, mu");

    let ratified = select_with(
        &graph,
        &SelectionFilter::default(),
        &Disassembler::new(VtypeLayout::RVV_1_0),
    );
    assert_eq!(ratified.nodes[0].label, "0\nvsetivli t0, 8, e8, mf8, tu, mu");
}

/// Tests the serialized selection shape.
#[test]
fn test_view_serialization() {
    let graph = GraphBuilder::new(GraphKind::Dependency)
        .build(&trace(vec![
            reg_op(0, "0x0", Some(1), &[]),
            reg_op(1, "0x4", Some(2), &[1]),
        ]))
        .unwrap();
    let value = serde_json::to_value(select(&graph, &SelectionFilter::default())).unwrap();

    let elements = value["elements"].as_array().unwrap();
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0]["id"], "instr_0");
    assert_eq!(elements[0]["type"], 1);
    assert_eq!(elements[0]["label"], "0\nvadd.vv v3, v2, v1");
    assert_eq!(elements[0]["instruction"]["number"], 0);
    assert_eq!(
        elements[2],
        serde_json::json!({
            "id": "instr_0-instr_1",
            "source": "instr_0",
            "target": "instr_1",
            "register": 1
        })
    );
}

/// Tests that selection leaves the source graph untouched.
#[test]
fn test_source_graph_unchanged() {
    let graph = GraphBuilder::new(GraphKind::AggregatedDependency)
        .build(&loop_trace(3))
        .unwrap();
    let before = graph.clone();
    let _ = select(
        &graph,
        &SelectionFilter {
            start: 5,
            end: Some(9),
            types: only(&[InstructionType::LoadStore]),
            max_nodes: 1,
        },
    );
    assert_eq!(graph.nodes(), before.nodes());
    assert_eq!(graph.edges(), before.edges());
}

/// Property test: every kept node matches, every kept edge is closed.
#[test]
fn test_random_selection_properties() {
    let mut rng = StdRng::seed_from_u64(99);
    let graph = GraphBuilder::new(GraphKind::AggregatedDependency)
        .build(&loop_trace(25))
        .unwrap();

    for _ in 0..100 {
        let start = rng.random_range(0..100);
        let end = rng.random_bool(0.7).then(|| start + rng.random_range(1..30));
        let types = rng.random_bool(0.5).then(|| {
            let all = [
                InstructionType::RegReg,
                InstructionType::VectorCsr,
                InstructionType::LoadStore,
            ];
            all.into_iter()
                .filter(|_| rng.random_bool(0.5))
                .collect::<BTreeSet<_>>()
        });
        let filter = SelectionFilter {
            start,
            end,
            types,
            max_nodes: rng.random_range(0..6),
        };
        let view = select(&graph, &filter);

        assert!(view.nodes.len() <= filter.max_nodes);
        for node in &view.nodes {
            assert!(filter.accepts(&node.payload));
        }
        for edge in &view.edges {
            assert!(view.contains(edge.source.as_str()));
            assert!(view.contains(edge.target.as_str()));
        }
    }
}
