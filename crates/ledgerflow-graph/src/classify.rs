//! Node Classifier: turns raw, untrusted records into typed flow nodes with
//! stable ids, repaired values, resolved colors, and bucket-ordered indices.

use crate::diag::{Anomaly, DiagnosticSink};
use crate::graph::FlowNode;
use crate::style::resolve_color;
use ledgerflow_core::{BuildError, NodeKind, RawLink, RawNode};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Substitute for missing or non-positive node values. Zero-width nodes are
/// degenerate for a layered layout, so coercion never produces zero.
pub const VALUE_EPSILON: f64 = 0.1;

/// Fixed bucket order; within a bucket, input order is preserved. This order,
/// not input order, determines final indices and therefore the layering.
const BUCKET_ORDER: [NodeKind; 4] = [
    NodeKind::Deposit,
    NodeKind::Category,
    NodeKind::Expense,
    NodeKind::Goal,
];

/// Classifier output: nodes indexed `[0, n)` in bucket order (no pool yet;
/// the assembler splices it in), plus the id-to-index map.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub nodes: Vec<FlowNode>,
    pub by_id: HashMap<String, usize>,
    pub deposit_count: usize,
}

/// Classifies raw records into flow nodes.
///
/// Per-record problems are repaired or dropped, never fatal: missing ids and
/// names are synthesized, unusable values are coerced to [`VALUE_EPSILON`],
/// raw pool-typed records and duplicate ids are dropped with a diagnostic.
/// Fails only when nothing usable remains.
pub fn classify(
    raw: &[RawNode],
    sink: &mut dyn DiagnosticSink,
) -> Result<Classified, BuildError> {
    let mut out = Classified::default();

    // Ids later records bring themselves. A synthesized id must never claim
    // one of these, or the explicitly-identified record would be the one
    // dropped as a duplicate.
    let explicit_ids: HashSet<&str> = raw
        .iter()
        .filter_map(|r| r.id.as_deref())
        .filter(|id| !id.is_empty())
        .collect();

    for kind in BUCKET_ORDER {
        let mut ordinal = 0usize;
        for record in raw.iter().filter(|r| r.kind == kind) {
            if let Some(node) = classify_one(record, ordinal, &out.by_id, &explicit_ids, sink) {
                out.by_id.insert(node.id.clone(), out.nodes.len());
                out.nodes.push(node);
                ordinal += 1;
            }
        }
        if kind == NodeKind::Deposit {
            out.deposit_count = ordinal;
        }
    }

    // Pool-typed raw records never make it into a bucket; report them here so
    // the caller can see the input was off.
    for record in raw.iter().filter(|r| r.kind == NodeKind::Pool) {
        sink.report(Anomaly::RawPoolDropped {
            id: record.id.clone(),
        });
    }

    if out.nodes.is_empty() {
        return Err(BuildError::NoValidNodes);
    }

    // Indices equal positions by construction; make that explicit.
    for (index, node) in out.nodes.iter_mut().enumerate() {
        node.index = index;
    }

    Ok(out)
}

fn classify_one(
    record: &RawNode,
    ordinal: usize,
    by_id: &HashMap<String, usize>,
    explicit_ids: &HashSet<&str>,
    sink: &mut dyn DiagnosticSink,
) -> Option<FlowNode> {
    let kind = record.kind;

    let id = match &record.id {
        Some(id) if !id.is_empty() => {
            if by_id.contains_key(id) {
                sink.report(Anomaly::DuplicateId { id: id.clone() });
                return None;
            }
            id.clone()
        }
        _ => {
            // Skip candidates any record claims explicitly, so synthesis can
            // never displace a record that brought its own id.
            let mut n = ordinal;
            let assigned = loop {
                let candidate = format!("{}-{}", kind.as_str(), n);
                if !by_id.contains_key(&candidate) && !explicit_ids.contains(candidate.as_str()) {
                    break candidate;
                }
                n += 1;
            };
            sink.report(Anomaly::MissingId {
                kind,
                assigned: assigned.clone(),
            });
            assigned
        }
    };

    let name = match &record.name {
        Some(name) if !name.is_empty() => name.clone(),
        _ => format!("{} {}", kind.label(), ordinal + 1),
    };

    let value = if record.value.is_finite() && record.value > 0.0 {
        record.value
    } else {
        sink.report(Anomaly::CoercedValue {
            id: id.clone(),
            original: record.value,
        });
        VALUE_EPSILON
    };

    // The expense palette is keyed by display names ("Weekly Shop"), the
    // category palette by category labels; pick the lookup key accordingly.
    let color_key = match kind {
        NodeKind::Expense => Some(name.as_str()),
        _ => record.category.as_deref().or(Some(name.as_str())),
    };
    let color = resolve_color(kind, color_key, ordinal);

    Some(FlowNode {
        id,
        name,
        kind,
        value,
        category: record.category.clone(),
        index: 0, // assigned after all buckets are collected
        color,
    })
}

/// Decodes an untyped JSON value into raw nodes.
///
/// The collection itself must be an array (`InvalidInput` otherwise);
/// elements that fail to decode are skipped with a diagnostic.
pub fn raw_nodes_from_json(
    value: &Value,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<RawNode>, BuildError> {
    decode_array(value, "nodes", sink)
}

/// Decodes an untyped JSON value into raw links. Same rules as
/// [`raw_nodes_from_json`].
pub fn raw_links_from_json(
    value: &Value,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<RawLink>, BuildError> {
    decode_array(value, "links", sink)
}

fn decode_array<T: serde::de::DeserializeOwned>(
    value: &Value,
    what: &str,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<T>, BuildError> {
    let items = value
        .as_array()
        .ok_or_else(|| BuildError::InvalidInput(format!("{what} is not an array")))?;

    let mut out = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        match serde_json::from_value::<T>(item.clone()) {
            Ok(record) => out.push(record),
            Err(err) => sink.report(Anomaly::UndecodableRecord {
                position,
                detail: err.to_string(),
            }),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::CollectingSink;
    use serde_json::json;

    fn raw(kind: NodeKind, id: &str, value: f64) -> RawNode {
        RawNode {
            id: Some(id.to_string()),
            name: Some(id.to_string()),
            kind,
            value,
            category: None,
        }
    }

    #[test]
    fn buckets_determine_index_order() {
        let records = vec![
            raw(NodeKind::Goal, "g1", 10.0),
            raw(NodeKind::Deposit, "d1", 100.0),
            raw(NodeKind::Expense, "e1", 20.0),
            raw(NodeKind::Category, "c1", 50.0),
            raw(NodeKind::Deposit, "d2", 40.0),
        ];
        let mut sink = CollectingSink::new();
        let classified = classify(&records, &mut sink).unwrap();

        let ids: Vec<&str> = classified.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2", "c1", "e1", "g1"]);
        assert_eq!(classified.deposit_count, 2);
        for (i, node) in classified.nodes.iter().enumerate() {
            assert_eq!(node.index, i);
            assert_eq!(classified.by_id[&node.id], i);
        }
        assert!(sink.anomalies.is_empty());
    }

    #[test]
    fn synthesizes_missing_id_and_name() {
        let records = vec![RawNode {
            id: None,
            name: None,
            kind: NodeKind::Deposit,
            value: 10.0,
            category: None,
        }];
        let mut sink = CollectingSink::new();
        let classified = classify(&records, &mut sink).unwrap();

        assert_eq!(classified.nodes[0].id, "deposit-0");
        assert_eq!(classified.nodes[0].name, "Deposit 1");
        assert_eq!(
            sink.count_of(|a| matches!(a, Anomaly::MissingId { .. })),
            1
        );
    }

    #[test]
    fn coerces_bad_values_to_epsilon() {
        let records = vec![
            raw(NodeKind::Deposit, "d1", -5.0),
            raw(NodeKind::Deposit, "d2", f64::NAN),
            raw(NodeKind::Deposit, "d3", 0.0),
        ];
        let mut sink = CollectingSink::new();
        let classified = classify(&records, &mut sink).unwrap();

        for node in &classified.nodes {
            assert_eq!(node.value, VALUE_EPSILON);
        }
        assert_eq!(
            sink.count_of(|a| matches!(a, Anomaly::CoercedValue { .. })),
            3
        );
    }

    #[test]
    fn synthesized_id_yields_to_explicit_id() {
        let records = vec![
            RawNode {
                id: None,
                name: None,
                kind: NodeKind::Deposit,
                value: 10.0,
                category: None,
            },
            raw(NodeKind::Deposit, "deposit-0", 20.0),
        ];
        let mut sink = CollectingSink::new();
        let classified = classify(&records, &mut sink).unwrap();

        // Both survive: synthesis steps around the id the second record owns.
        assert_eq!(classified.nodes.len(), 2);
        assert_eq!(classified.nodes[0].id, "deposit-1");
        assert_eq!(classified.nodes[1].id, "deposit-0");
        assert_eq!(classified.nodes[1].value, 20.0);
        assert_eq!(
            sink.count_of(|a| matches!(a, Anomaly::DuplicateId { .. })),
            0
        );
    }

    #[test]
    fn expense_color_keys_off_display_name() {
        let records = vec![RawNode {
            id: Some("exp1".to_string()),
            name: Some("Weekly Shop".to_string()),
            kind: NodeKind::Expense,
            value: 120.0,
            category: Some("groceries".to_string()),
        }];
        let mut sink = CollectingSink::new();
        let classified = classify(&records, &mut sink).unwrap();

        assert_eq!(classified.nodes[0].color, crate::style::Color::rgb(5, 150, 105));
        assert_ne!(classified.nodes[0].color, crate::style::COLOR_DEFAULT);
    }

    #[test]
    fn drops_raw_pool_and_duplicates() {
        let records = vec![
            raw(NodeKind::Deposit, "d1", 10.0),
            raw(NodeKind::Pool, "sneaky", 99.0),
            raw(NodeKind::Deposit, "d1", 20.0),
        ];
        let mut sink = CollectingSink::new();
        let classified = classify(&records, &mut sink).unwrap();

        assert_eq!(classified.nodes.len(), 1);
        assert_eq!(classified.nodes[0].value, 10.0);
        assert_eq!(
            sink.count_of(|a| matches!(a, Anomaly::RawPoolDropped { .. })),
            1
        );
        assert_eq!(
            sink.count_of(|a| matches!(a, Anomaly::DuplicateId { .. })),
            1
        );
    }

    #[test]
    fn empty_input_is_no_valid_nodes() {
        let mut sink = CollectingSink::new();
        assert_eq!(
            classify(&[], &mut sink).unwrap_err(),
            BuildError::NoValidNodes
        );
    }

    #[test]
    fn json_boundary_rejects_non_arrays() {
        let mut sink = CollectingSink::new();
        let err = raw_nodes_from_json(&json!({"not": "an array"}), &mut sink).unwrap_err();
        assert!(matches!(err, BuildError::InvalidInput(_)));
    }

    #[test]
    fn json_boundary_skips_undecodable_elements() {
        let mut sink = CollectingSink::new();
        let value = json!([
            {"type": "deposit", "id": "d1", "value": 100},
            {"type": "spaceship", "id": "x"},
            42
        ]);
        let nodes = raw_nodes_from_json(&value, &mut sink).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(
            sink.count_of(|a| matches!(a, Anomaly::UndecodableRecord { .. })),
            2
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn kind_strategy() -> impl Strategy<Value = NodeKind> {
            prop_oneof![
                Just(NodeKind::Deposit),
                Just(NodeKind::Category),
                Just(NodeKind::Expense),
                Just(NodeKind::Goal),
            ]
        }

        fn raw_node_strategy() -> impl Strategy<Value = RawNode> {
            (
                proptest::option::of("[a-z]{1,6}"),
                proptest::option::of("[A-Za-z ]{0,12}"),
                kind_strategy(),
                prop_oneof![
                    any::<f64>(),
                    Just(f64::NAN),
                    -100.0f64..10_000.0,
                ],
                proptest::option::of("[a-z]{1,8}"),
            )
                .prop_map(|(id, name, kind, value, category)| RawNode {
                    id,
                    name,
                    kind,
                    value,
                    category,
                })
        }

        proptest! {
            /// All surviving nodes have positive values and dense indices.
            #[test]
            fn prop_values_positive_indices_dense(
                records in proptest::collection::vec(raw_node_strategy(), 1..40)
            ) {
                let mut sink = CollectingSink::new();
                if let Ok(classified) = classify(&records, &mut sink) {
                    for (i, node) in classified.nodes.iter().enumerate() {
                        prop_assert_eq!(node.index, i);
                        prop_assert!(node.value > 0.0);
                        prop_assert!(node.value.is_finite());
                    }
                }
            }

            /// Classification is deterministic: two runs agree exactly.
            #[test]
            fn prop_classification_deterministic(
                records in proptest::collection::vec(raw_node_strategy(), 0..30)
            ) {
                let mut sink_a = CollectingSink::new();
                let mut sink_b = CollectingSink::new();
                let a = classify(&records, &mut sink_a);
                let b = classify(&records, &mut sink_b);
                match (a, b) {
                    (Ok(ca), Ok(cb)) => prop_assert_eq!(ca.nodes, cb.nodes),
                    (Err(ea), Err(eb)) => prop_assert_eq!(ea, eb),
                    _ => prop_assert!(false, "runs disagreed on success"),
                }
            }
        }
    }
}
