use serde::{Deserialize, Serialize};
use std::fmt;

pub mod aggregate;
pub mod error;
pub mod records;

pub use aggregate::{ActivityEntry, ActivityKind, CategoryBreakdownRow, StatsSummary};
pub use error::BuildError;
pub use records::{CategoryRecord, DepositRecord, ExpenseRecord, GoalRecord};

/// Semantic role of a node in the money-flow graph.
///
/// `Pool` is synthetic: it is inserted between deposits and categories during
/// assembly and is never valid in raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Deposit,
    Pool,
    Category,
    Expense,
    Goal,
}

impl NodeKind {
    /// Lowercase wire name, also used when synthesizing ids ("deposit-0").
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Deposit => "deposit",
            NodeKind::Pool => "pool",
            NodeKind::Category => "category",
            NodeKind::Expense => "expense",
            NodeKind::Goal => "goal",
        }
    }

    /// Title-cased label used when synthesizing display names ("Deposit 1").
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Deposit => "Deposit",
            NodeKind::Pool => "Pool",
            NodeKind::Category => "Category",
            NodeKind::Expense => "Expense",
            NodeKind::Goal => "Goal",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn value_default() -> f64 {
    f64::NAN
}

/// A raw, untrusted node record as handed in by the data layer.
///
/// Only `kind` is required; everything else is repaired or synthesized by the
/// classifier. `value` defaults to NaN when absent so the coercion pass can
/// treat "missing" and "not a finite number" uniformly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default = "value_default")]
    pub value: f64,
    #[serde(default)]
    pub category: Option<String>,
}

/// A raw, untrusted link record referencing nodes by string id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLink {
    pub source: String,
    pub target: String,
    pub value: f64,
    #[serde(default)]
    pub category: Option<String>,
}
