//! Aggregation node synthesizer: the single pooled-income node that sits
//! between deposits and categories.

use crate::graph::FlowNode;
use crate::style::resolve_color;
use ledgerflow_core::NodeKind;

pub const POOL_ID: &str = "pool";
pub const POOL_NAME: &str = "Income";

/// Builds the pool node from the classified deposit nodes.
///
/// Returns `None` when there are no deposits: the graph then simply has no
/// deposit tier, and downstream derivation produces zero pool-adjacent edges.
/// The pool's index is the deposit count, i.e. the position directly after
/// the last deposit node.
pub fn synthesize_pool(deposits: &[FlowNode]) -> Option<FlowNode> {
    if deposits.is_empty() {
        return None;
    }

    let value: f64 = deposits.iter().map(|d| d.value).sum();

    Some(FlowNode {
        id: POOL_ID.to_string(),
        name: POOL_NAME.to_string(),
        kind: NodeKind::Pool,
        value,
        category: None,
        index: deposits.len(),
        color: resolve_color(NodeKind::Pool, None, 0),
    })
}
