pub mod adapter;
pub mod assemble;
pub mod classify;
pub mod diag;
pub mod edges;
pub mod graph;
pub mod layout;
pub mod pool;
pub mod style;

pub use adapter::{AdapterConfig, GoalFlowPolicy, prepare};
pub use assemble::{FlowView, assemble, assemble_json, assemble_with_sink, build_view};
pub use classify::{Classified, VALUE_EPSILON, classify, raw_links_from_json, raw_nodes_from_json};
pub use diag::{Anomaly, CollectingSink, DiagnosticSink, TracingSink};
pub use edges::{derive_edges, validate_edges};
pub use graph::{FlowEdge, FlowGraph, FlowNode};
pub use layout::{FontSizes, LayoutConfig, Margin, resolve_layout};
pub use pool::synthesize_pool;
pub use style::{Color, resolve_color};
