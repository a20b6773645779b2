//! Graph Construction.
//!
//! All three graph variants are produced by the same forward pass. For every
//! record, in trace order:
//!
//! 1. The vector state tracker is updated, then snapshotted, so each node
//!    carries the state as of immediately after its instruction.
//! 2. The record is placed in the graph: a fresh node per instruction, or
//!    the node of its program counter (promoted to an iteration group on the
//!    second execution).
//! 3. Edges are added: register dependencies from the last writer of each
//!    `vs1`/`vs2`, or an execution-order edge from the previous node.
//!
//! The pass state lives in an explicit [`BuildState`], so a graph can also be
//! built incrementally from successive chunks of a trace with
//! [`GraphBuilder::extend`].

use tracing::{debug, info, instrument};

use super::producers::RegisterProducers;
use super::{DependencyGraph, EdgeKind, GraphKind, NodeId, NodePayload, TracedInstruction};
use crate::arch::StateTracker;
use crate::common::GraphError;
use crate::trace::{InstructionRecord, Trace};

/// Mutable state threaded through one build.
#[derive(Clone, Debug, Default)]
pub struct BuildState {
    tracker: StateTracker,
    producers: RegisterProducers,
    previous: Option<usize>,
}

impl BuildState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    pub fn producers(&self) -> &RegisterProducers {
        &self.producers
    }

    /// Index of the node placed by the last record, if any.
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }
}

/// Builds one graph variant from a trace.
#[derive(Clone, Copy, Debug)]
pub struct GraphBuilder {
    kind: GraphKind,
}

impl GraphBuilder {
    pub fn new(kind: GraphKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Builds a graph from a whole trace.
    ///
    /// # Arguments
    ///
    /// * `trace` - Validated records in execution order.
    ///
    /// # Returns
    ///
    /// The finished graph. A record that cannot be placed (a repeated
    /// sequence number in the per-instruction variant) aborts the build and
    /// no graph is returned.
    #[instrument(skip_all, fields(kind = %self.kind, records = trace.len()))]
    pub fn build(&self, trace: &Trace) -> Result<DependencyGraph, GraphError> {
        let mut graph = DependencyGraph::new(self.kind);
        let mut state = BuildState::new();
        self.extend(&mut state, &mut graph, trace)?;

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph built"
        );
        Ok(graph)
    }

    /// Feeds more records into a graph under construction.
    ///
    /// `state` and `graph` must come from the same build and records must
    /// continue the trace where the previous call stopped.
    pub fn extend<'a, I>(
        &self,
        state: &mut BuildState,
        graph: &mut DependencyGraph,
        records: I,
    ) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = &'a InstructionRecord>,
    {
        for record in records {
            self.step(state, graph, record)?;
        }
        Ok(())
    }

    fn step(
        &self,
        state: &mut BuildState,
        graph: &mut DependencyGraph,
        record: &InstructionRecord,
    ) -> Result<(), GraphError> {
        state.tracker.update(record);
        let occurrence = TracedInstruction {
            record: record.clone(),
            rvv_state: state.tracker.snapshot(),
        };
        let current = self.place(graph, occurrence)?;

        match self.kind {
            GraphKind::ExecutionOrder => {
                if let Some(previous) = state.previous {
                    graph.add_edge(previous, current, EdgeKind::ExecutionOrder);
                }
            }
            GraphKind::Dependency | GraphKind::AggregatedDependency => {
                for reg in record.vector_sources() {
                    if let Some(producer) = state.producers.producer(reg) {
                        graph.add_edge(producer, current, EdgeKind::RegisterDependency(reg));
                    }
                }
                for reg in record.vector_destinations() {
                    state.producers.record_write(reg, current);
                }
            }
        }

        state.previous = Some(current);
        Ok(())
    }

    /// Inserts or folds `occurrence` and returns the index of its node.
    fn place(
        &self,
        graph: &mut DependencyGraph,
        occurrence: TracedInstruction,
    ) -> Result<usize, GraphError> {
        if !self.kind.aggregates() {
            let id = NodeId::for_instruction(occurrence.record.number);
            return graph.add_node(id, NodePayload::Single(occurrence));
        }

        let id = NodeId::for_pc(&occurrence.record.pc);
        let Some(index) = graph.index_of(id.as_str()) else {
            return graph.add_node(id, NodePayload::Single(occurrence));
        };

        if let Some(payload) = graph.payload_mut(index) {
            if payload.absorb(occurrence) {
                debug!(node = %id, "folded repeated pc into iteration group");
            }
        }
        Ok(index)
    }
}
