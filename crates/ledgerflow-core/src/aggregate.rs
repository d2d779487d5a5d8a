//! Pure aggregation helpers for the dashboard panels that sit next to the
//! flow diagram: stats summary, category breakdown, recent activity.
//!
//! These never depend on a flow-graph build succeeding; a chart failure must
//! not take the rest of the dashboard down with it.

use crate::records::{CategoryRecord, DepositRecord, ExpenseRecord};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Headline figures for the stats panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_deposits: f64,
    pub total_expenses: f64,
    pub remaining_balance: f64,
    pub deposits_this_month: f64,
    pub expenses_this_month: f64,
}

impl StatsSummary {
    /// `today` anchors the "this month" figures; passing it in keeps the
    /// computation deterministic under test.
    pub fn compute(
        deposits: &[DepositRecord],
        expenses: &[ExpenseRecord],
        today: NaiveDate,
    ) -> Self {
        let same_month =
            |d: NaiveDate| d.year() == today.year() && d.month() == today.month();

        let total_deposits: f64 = deposits.iter().map(|d| d.amount).sum();
        let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();
        let deposits_this_month = deposits
            .iter()
            .filter(|d| same_month(d.date))
            .map(|d| d.amount)
            .sum();
        let expenses_this_month = expenses
            .iter()
            .filter(|e| same_month(e.date))
            .map(|e| e.amount)
            .sum();

        Self {
            total_deposits,
            total_expenses,
            remaining_balance: total_deposits - total_expenses,
            deposits_this_month,
            expenses_this_month,
        }
    }
}

/// One row of the category breakdown table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdownRow {
    pub category_id: String,
    pub name: String,
    /// Share of total deposits this category is allocated.
    pub allocated: f64,
    /// Sum of expenses recorded against this category.
    pub spent: f64,
    pub remaining: f64,
}

/// Computes one row per category, in the categories' input order.
pub fn category_breakdown(
    categories: &[CategoryRecord],
    expenses: &[ExpenseRecord],
    deposits: &[DepositRecord],
) -> Vec<CategoryBreakdownRow> {
    let total_deposits: f64 = deposits.iter().map(|d| d.amount).sum();

    categories
        .iter()
        .map(|category| {
            let allocated = total_deposits * category.allocation_percentage / 100.0;
            let spent: f64 = expenses
                .iter()
                .filter(|e| e.category_id == category.id)
                .map(|e| e.amount)
                .sum();
            CategoryBreakdownRow {
                category_id: category.id.clone(),
                name: category.name.clone(),
                allocated,
                spent,
                remaining: allocated - spent,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Deposit,
    Expense,
}

/// One entry of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub date: NaiveDate,
    pub amount: f64,
    pub label: String,
}

/// Merges expenses and deposits into a single feed, most recent first,
/// truncated to `limit` entries. Ties on date keep deposits before expenses.
pub fn recent_activity(
    deposits: &[DepositRecord],
    expenses: &[ExpenseRecord],
    limit: usize,
) -> Vec<ActivityEntry> {
    let mut entries: Vec<ActivityEntry> = deposits
        .iter()
        .map(|d| ActivityEntry {
            kind: ActivityKind::Deposit,
            date: d.date,
            amount: d.amount,
            label: d.contributor_name.clone(),
        })
        .chain(expenses.iter().map(|e| ActivityEntry {
            kind: ActivityKind::Expense,
            date: e.date,
            amount: e.amount,
            label: e
                .description
                .clone()
                .unwrap_or_else(|| "Expense".to_string()),
        }))
        .collect();

    // Stable sort keeps the deposit-before-expense chain order on date ties.
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries.truncate(limit);
    entries
}
