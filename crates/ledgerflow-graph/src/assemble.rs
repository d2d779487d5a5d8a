//! Flow Graph Assembler: composes classification, pool synthesis, edge
//! derivation, and validation into one deterministic build.

use crate::classify::{classify, raw_links_from_json, raw_nodes_from_json};
use crate::diag::{DiagnosticSink, TracingSink};
use crate::edges::{derive_edges, validate_edges};
use crate::graph::FlowGraph;
use crate::layout::{LayoutConfig, resolve_layout};
use crate::pool::synthesize_pool;
use ledgerflow_core::{BuildError, RawLink, RawNode};
use serde_json::Value;
use std::collections::HashMap;

/// A graph plus the layout profile for the current container width.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowView {
    pub graph: FlowGraph,
    pub layout: LayoutConfig,
}

/// Builds a validated flow graph from raw records.
///
/// Orchestration order matters: the pool node is spliced into the node list
/// and the id map is re-derived *before* edge derivation, so every edge is
/// resolved against final indices. Inputs are never mutated; calling twice
/// with identical inputs yields element-wise identical output.
///
/// Recoverable anomalies go to the default tracing sink; only the three
/// whole-graph `BuildError` conditions surface. This function never panics on
/// malformed records.
pub fn assemble(raw_nodes: &[RawNode], raw_links: &[RawLink]) -> Result<FlowGraph, BuildError> {
    assemble_with_sink(raw_nodes, raw_links, &mut TracingSink)
}

/// [`assemble`] with an explicit diagnostic sink.
pub fn assemble_with_sink(
    raw_nodes: &[RawNode],
    raw_links: &[RawLink],
    sink: &mut dyn DiagnosticSink,
) -> Result<FlowGraph, BuildError> {
    // 1. Classify into bucket-ordered nodes.
    let classified = classify(raw_nodes, sink)?;
    let mut nodes = classified.nodes;
    let deposit_count = classified.deposit_count;

    // 2. Splice the pool directly after the deposits and reindex.
    let pool = synthesize_pool(&nodes[..deposit_count]);
    let pool_index = pool.as_ref().map(|p| p.index);
    if let Some(pool_node) = pool {
        nodes.insert(deposit_count, pool_node);
        for (index, node) in nodes.iter_mut().enumerate() {
            node.index = index;
        }
    }

    // 3. Re-derive the id map over the final node list.
    let by_id: HashMap<String, usize> =
        nodes.iter().map(|n| (n.id.clone(), n.index)).collect();

    // 4. Derive and validate edges against final indices.
    let candidates = derive_edges(raw_links, &nodes, &by_id, pool_index, sink);
    let links = validate_edges(candidates, nodes.len(), sink);

    if links.is_empty() {
        return Err(BuildError::NoValidLinks);
    }

    Ok(FlowGraph { nodes, links })
}

/// Builds the graph and resolves the layout profile in one call.
pub fn build_view(
    raw_nodes: &[RawNode],
    raw_links: &[RawLink],
    container_width: f64,
) -> Result<FlowView, BuildError> {
    let graph = assemble(raw_nodes, raw_links)?;
    Ok(FlowView {
        graph,
        layout: resolve_layout(container_width),
    })
}

/// Untyped entry point for callers holding JSON straight off the wire.
pub fn assemble_json(
    nodes: &Value,
    links: &Value,
    sink: &mut dyn DiagnosticSink,
) -> Result<FlowGraph, BuildError> {
    let raw_nodes = raw_nodes_from_json(nodes, sink)?;
    let raw_links = raw_links_from_json(links, sink)?;
    assemble_with_sink(&raw_nodes, &raw_links, sink)
}
