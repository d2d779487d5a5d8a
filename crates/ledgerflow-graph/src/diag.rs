//! Diagnostics for recoverable per-record anomalies.
//!
//! The pipeline repairs or drops bad records instead of failing the build;
//! each repair is reported here so callers (and tests) can observe what was
//! done without capturing log output.

use ledgerflow_core::NodeKind;

/// A recoverable anomaly encountered while building a graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Anomaly {
    /// A raw node carried no id; one was synthesized from kind + ordinal.
    MissingId { kind: NodeKind, assigned: String },
    /// A node value was missing, non-finite, or non-positive and was
    /// replaced with the epsilon substitute.
    CoercedValue { id: String, original: f64 },
    /// A raw record claimed the synthetic pool kind and was dropped.
    RawPoolDropped { id: Option<String> },
    /// A later record reused an existing id and was dropped.
    DuplicateId { id: String },
    /// A link referenced an id absent from the node set and was dropped.
    UnresolvedReference { source: String, target: String },
    /// An edge failed the final validation gate and was dropped.
    InvalidEdge { source: usize, target: usize, value: f64 },
    /// A JSON element could not be decoded as a record and was skipped.
    UndecodableRecord { position: usize, detail: String },
}

pub trait DiagnosticSink {
    fn report(&mut self, anomaly: Anomaly);
}

/// Default sink: forwards anomalies to `tracing` at warn level.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, anomaly: Anomaly) {
        match &anomaly {
            Anomaly::MissingId { kind, assigned } => {
                tracing::warn!("node missing id, assigned {assigned} for kind {kind}");
            }
            Anomaly::CoercedValue { id, original } => {
                tracing::warn!("node {id} had unusable value {original}, coerced to epsilon");
            }
            Anomaly::RawPoolDropped { id } => {
                tracing::warn!("dropping raw pool-typed record {id:?}; pool is synthetic");
            }
            Anomaly::DuplicateId { id } => {
                tracing::warn!("dropping record with duplicate id {id}");
            }
            Anomaly::UnresolvedReference { source, target } => {
                tracing::warn!("dropping link {source} -> {target}: unresolved endpoint");
            }
            Anomaly::InvalidEdge {
                source,
                target,
                value,
            } => {
                tracing::warn!("dropping invalid edge {source} -> {target} (value {value})");
            }
            Anomaly::UndecodableRecord { position, detail } => {
                tracing::warn!("skipping undecodable record at position {position}: {detail}");
            }
        }
    }
}

/// Test sink that records every anomaly it sees.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub anomalies: Vec<Anomaly>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_of(&self, matcher: impl Fn(&Anomaly) -> bool) -> usize {
        self.anomalies.iter().filter(|a| matcher(a)).count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, anomaly: Anomaly) {
        self.anomalies.push(anomaly);
    }
}
