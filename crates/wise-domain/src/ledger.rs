//! The explicit application state object passed into and out of the engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    budget::{BudgetLimit, OverallBudget},
    recurring::RecurringDefinition,
    transaction::Transaction,
};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Housing",
    "Utilities",
    "Entertainment",
    "Shopping",
    "Health",
    "Other",
];

/// Everything a user owns: entries, recurring templates, budgets and categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u32,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub recurring: Vec<RecurringDefinition>,
    #[serde(default, alias = "limits")]
    pub budget_limits: Vec<BudgetLimit>,
    #[serde(default)]
    pub overall_budget: OverallBudget,
    #[serde(default = "Ledger::default_categories")]
    pub categories: Vec<String>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: Vec::new(),
            recurring: Vec::new(),
            budget_limits: Vec::new(),
            overall_budget: OverallBudget::default(),
            categories: Self::default_categories(),
        }
    }
}

impl Ledger {
    pub fn schema_version_default() -> u32 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn default_categories() -> Vec<String> {
        DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|t| t.id == id)
    }

    pub fn definition(&self, id: Uuid) -> Option<&RecurringDefinition> {
        self.recurring.iter().find(|r| r.id == id)
    }

    pub fn definition_mut(&mut self, id: Uuid) -> Option<&mut RecurringDefinition> {
        self.recurring.iter_mut().find(|r| r.id == id)
    }

    pub fn limit_for(&self, category: &str) -> Option<f64> {
        self.budget_limits
            .iter()
            .find(|l| l.category == category)
            .map(|l| l.limit)
    }
}
