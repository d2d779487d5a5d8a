//! Edge Deriver & Validator: derives the three edge tiers from raw link
//! records and runs every candidate through a single final validation gate.

use crate::diag::{Anomaly, DiagnosticSink};
use crate::graph::{FlowEdge, FlowNode};
use ledgerflow_core::{NodeKind, RawLink};
use std::collections::HashMap;

/// Derives all edge tiers against the final node list (pool already spliced).
///
/// Tier 1, deposit -> pool, is generated from the nodes themselves, one edge
/// per deposit carrying the deposit's value; raw links on the income side are
/// ignored for this tier, which sidesteps inconsistent or missing raw linkage
/// data entirely.
///
/// Tiers 2 and 3 come from raw links: a link whose resolved source is a
/// deposit and target a category is promoted to pool -> category; links from
/// categories to expenses/goals (and chained expense -> goal) keep their
/// resolved endpoints. Links with unresolved endpoints are dropped with a
/// diagnostic; links between any other kind pairing are ignored.
///
/// The output may still over-produce; only [`validate_edges`] guarantees
/// soundness.
pub fn derive_edges(
    raw_links: &[RawLink],
    nodes: &[FlowNode],
    by_id: &HashMap<String, usize>,
    pool_index: Option<usize>,
    sink: &mut dyn DiagnosticSink,
) -> Vec<FlowEdge> {
    let mut edges = Vec::new();

    // Tier 1: deposit -> pool, straight from the nodes.
    if let Some(pool) = pool_index {
        for node in nodes.iter().filter(|n| n.kind == NodeKind::Deposit) {
            edges.push(FlowEdge {
                source: node.index,
                target: pool,
                value: node.value,
                category: None,
            });
        }
    }

    // Tiers 2 and 3: raw links with endpoints resolved against the node set.
    for link in raw_links {
        let (source, target) = match (by_id.get(&link.source), by_id.get(&link.target)) {
            (Some(&s), Some(&t)) => (&nodes[s], &nodes[t]),
            _ => {
                sink.report(Anomaly::UnresolvedReference {
                    source: link.source.clone(),
                    target: link.target.clone(),
                });
                continue;
            }
        };

        match (source.kind, target.kind) {
            (NodeKind::Deposit, NodeKind::Category) => {
                // Promoted: the income side flows through the pool, so the
                // source is rewritten from the deposit to the pool index.
                let Some(pool) = pool_index else {
                    continue;
                };
                edges.push(FlowEdge {
                    source: pool,
                    target: target.index,
                    value: link.value,
                    category: target.category.clone(),
                });
            }
            (NodeKind::Category, NodeKind::Expense | NodeKind::Goal)
            | (NodeKind::Expense, NodeKind::Goal) => {
                let category = link
                    .category
                    .clone()
                    .or_else(|| source.category.clone())
                    .or_else(|| target.category.clone());
                edges.push(FlowEdge {
                    source: source.index,
                    target: target.index,
                    value: link.value,
                    category,
                });
            }
            _ => {}
        }
    }

    edges
}

/// The single source of truth for "is this edge safe to hand to a layout
/// engine": endpoints in range, no self-loops, finite positive value.
/// Everything upstream may over-produce; this gate is mandatory and final.
pub fn validate_edges(
    edges: Vec<FlowEdge>,
    node_count: usize,
    sink: &mut dyn DiagnosticSink,
) -> Vec<FlowEdge> {
    edges
        .into_iter()
        .filter(|edge| {
            let sound = edge.source < node_count
                && edge.target < node_count
                && edge.source != edge.target
                && edge.value.is_finite()
                && edge.value > 0.0;
            if !sound {
                sink.report(Anomaly::InvalidEdge {
                    source: edge.source,
                    target: edge.target,
                    value: edge.value,
                });
            }
            sound
        })
        .collect()
}
