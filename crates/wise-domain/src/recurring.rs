//! Recurring transaction templates and their schedule pointers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;
use crate::transaction::{description_or_category, Transaction};

/// A template plus a schedule pointer that the materializer advances.
///
/// `next_due_date` only moves forward. `start_date` never changes after
/// creation; the occurrence at `start_date` is recorded by the caller, so a
/// fresh definition points at its second occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringDefinition {
    pub id: Uuid,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(with = "iso_timestamp")]
    pub start_date: NaiveDateTime,
    #[serde(with = "iso_timestamp")]
    pub next_due_date: NaiveDateTime,
}

impl RecurringDefinition {
    /// Builds a definition from the transaction that opened the series.
    ///
    /// `next_due_date` must already be advanced one step past the
    /// transaction's date.
    pub fn from_initial(
        initial: &Transaction,
        frequency: Frequency,
        next_due_date: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: initial.amount,
            category: initial.category.clone(),
            description: description_or_category(initial.description.clone(), &initial.category),
            kind: initial.kind,
            frequency,
            start_date: truncate_to_millis(initial.date),
            next_due_date: truncate_to_millis(next_due_date),
        }
    }

    /// Creates the concrete ledger entry for the occurrence currently pointed at.
    pub fn occurrence(&self) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            amount: self.amount,
            category: self.category.clone(),
            description: self.description.clone(),
            date: truncate_to_millis(self.next_due_date),
            kind: self.kind,
        }
    }

    pub fn is_expense(&self) -> bool {
        !self.kind.is_income()
    }
}
