//! Input preparation: maps persistence-layer records into the raw node/link
//! shape the pipeline consumes. This is adapter policy, not core algorithm;
//! in particular the category -> goal edge value is a product decision and is
//! configurable here rather than baked into derivation.

use crate::style::slug;
use ledgerflow_core::{
    CategoryRecord, DepositRecord, ExpenseRecord, GoalRecord, NodeKind, RawLink, RawNode,
};

/// How much flow to draw from a category into a goal attached to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoalFlowPolicy {
    /// The category's full allocation value.
    FullAllocation,
    /// A fraction of the category's allocation value.
    AllocationFraction(f64),
    /// A fraction of the goal's target amount.
    TargetFraction(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdapterConfig {
    pub goal_flow: GoalFlowPolicy,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            goal_flow: GoalFlowPolicy::AllocationFraction(0.10),
        }
    }
}

/// Maps read-API records into raw nodes and links.
///
/// - deposits are grouped per contributor (one deposit node each, summed);
/// - each category node is valued at its allocation share of total deposits,
///   with contributor -> category links split by contributor share;
/// - each expense record becomes its own expense node linked from its
///   category;
/// - goals with a category get a category -> goal link valued per
///   [`GoalFlowPolicy`].
pub fn prepare(
    categories: &[CategoryRecord],
    expenses: &[ExpenseRecord],
    deposits: &[DepositRecord],
    goals: &[GoalRecord],
    config: &AdapterConfig,
) -> (Vec<RawNode>, Vec<RawLink>) {
    let mut nodes = Vec::new();
    let mut links = Vec::new();

    // Deposits grouped by contributor, first-appearance order.
    let mut contributors: Vec<(String, f64)> = Vec::new();
    for deposit in deposits {
        match contributors
            .iter_mut()
            .find(|(name, _)| *name == deposit.contributor_name)
        {
            Some((_, total)) => *total += deposit.amount,
            None => contributors.push((deposit.contributor_name.clone(), deposit.amount)),
        }
    }
    let total_deposits: f64 = contributors.iter().map(|(_, total)| total).sum();

    for (name, total) in &contributors {
        nodes.push(RawNode {
            id: Some(format!("contrib-{}", slug(name))),
            name: Some(name.clone()),
            kind: NodeKind::Deposit,
            value: *total,
            category: None,
        });
    }

    // Categories valued at their allocation share, with per-contributor links.
    for category in categories {
        let allocated = total_deposits * category.allocation_percentage / 100.0;
        let label = slug(&category.name);
        nodes.push(RawNode {
            id: Some(category.id.clone()),
            name: Some(category.name.clone()),
            kind: NodeKind::Category,
            value: allocated,
            category: Some(label.clone()),
        });

        for (name, total) in &contributors {
            if total_deposits <= 0.0 {
                break;
            }
            let share = total / total_deposits;
            links.push(RawLink {
                source: format!("contrib-{}", slug(name)),
                target: category.id.clone(),
                value: allocated * share,
                category: Some(label.clone()),
            });
        }
    }

    // One expense node per record, linked from its category.
    for expense in expenses {
        let category = categories.iter().find(|c| c.id == expense.category_id);
        let label = category.map(|c| slug(&c.name));
        nodes.push(RawNode {
            id: Some(expense.id.clone()),
            name: expense.description.clone(),
            kind: NodeKind::Expense,
            value: expense.amount,
            category: label.clone(),
        });
        links.push(RawLink {
            source: expense.category_id.clone(),
            target: expense.id.clone(),
            value: expense.amount,
            category: label,
        });
    }

    // Goals, linked from their category when they have one.
    for goal in goals {
        let category = goal
            .category_id
            .as_ref()
            .and_then(|id| categories.iter().find(|c| c.id == *id));
        let label = category.map(|c| slug(&c.name));
        nodes.push(RawNode {
            id: Some(goal.id.clone()),
            name: Some(goal.name.clone()),
            kind: NodeKind::Goal,
            value: goal.current_amount,
            category: label.clone(),
        });

        if let Some(category) = category {
            let allocated = total_deposits * category.allocation_percentage / 100.0;
            let value = match config.goal_flow {
                GoalFlowPolicy::FullAllocation => allocated,
                GoalFlowPolicy::AllocationFraction(f) => allocated * f,
                GoalFlowPolicy::TargetFraction(f) => goal.target_amount * f,
            };
            links.push(RawLink {
                source: category.id.clone(),
                target: goal.id.clone(),
                value,
                category: label,
            });
        }
    }

    (nodes, links)
}
