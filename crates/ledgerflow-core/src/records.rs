//! Record types read from the persistence layer.
//!
//! The persistence layer itself (tables, queries, migrations) is an external
//! collaborator; these structs are the read-API shapes the graph adapter and
//! the dashboard aggregates consume.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A budget category with its share of pooled income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    /// Percentage of total deposits allocated to this category, 0..=100.
    pub allocation_percentage: f64,
}

/// A single recorded expense against a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: String,
    pub amount: f64,
    pub category_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

/// A deposit made by one contributor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositRecord {
    pub id: String,
    pub amount: f64,
    pub contributor_name: String,
    pub date: NaiveDate,
    /// "recurring" or "one-off"; informational only for graph purposes.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// A savings goal, optionally tied to a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}
