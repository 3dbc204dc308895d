//! Immutable ledger entries.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Category label reserved for income entries.
pub const INCOME_CATEGORY: &str = "Income";

/// A concrete income or expense that occurred at `date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "iso_timestamp")]
    pub date: NaiveDateTime,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    /// Builds an entry with a fresh id. `date` is truncated to milliseconds.
    pub fn new(
        kind: TransactionType,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDateTime,
    ) -> Self {
        let category = category.into();
        let description = description_or_category(description.into(), &category);
        Self {
            id: Uuid::new_v4(),
            amount,
            category,
            description,
            date: truncate_to_millis(date),
            kind,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    /// Signed contribution to a balance: positive for income, negative for expenses.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// User input for a new entry before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub kind: TransactionType,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: NaiveDateTime,
}

impl EntryDraft {
    pub fn expense(amount: f64, category: impl Into<String>, date: NaiveDateTime) -> Self {
        Self {
            kind: TransactionType::Expense,
            amount,
            category: category.into(),
            description: String::new(),
            date,
        }
    }

    pub fn income(amount: f64, date: NaiveDateTime) -> Self {
        Self {
            kind: TransactionType::Income,
            amount,
            category: INCOME_CATEGORY.into(),
            description: String::new(),
            date,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Category actually filed: income always lands in [`INCOME_CATEGORY`].
    pub fn resolved_category(&self) -> String {
        match self.kind {
            TransactionType::Income => INCOME_CATEGORY.to_string(),
            TransactionType::Expense => self.category.trim().to_string(),
        }
    }

    pub fn into_transaction(self) -> Transaction {
        let category = self.resolved_category();
        Transaction::new(self.kind, self.amount, category, self.description, self.date)
    }
}

pub(crate) fn description_or_category(description: String, category: &str) -> String {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        category.to_string()
    } else {
        trimmed.to_string()
    }
}
