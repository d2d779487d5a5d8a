use crate::style::Color;
use ledgerflow_core::NodeKind;
use serde::{Deserialize, Serialize};

/// A fully classified participant in the money-flow graph.
///
/// `index` is dense and equals the node's position in `FlowGraph::nodes` for
/// one build; it is recomputed on every rebuild and carries no meaning across
/// builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub value: f64,
    #[serde(default)]
    pub category: Option<String>,
    pub index: usize,
    pub color: Color,
}

/// A directed, weighted relation between two nodes, by resolved index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    #[serde(default)]
    pub category: Option<String>,
}

/// The assembled graph handed to a layered-layout renderer.
///
/// Rebuilt whole from raw records on every input change; there is no
/// partial-update path, which removes index drift as a failure class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowEdge>,
}

impl FlowGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.links.len()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The synthetic pool node, when the graph has a deposit tier.
    pub fn pool(&self) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.kind == NodeKind::Pool)
    }
}
