//! Recurrence materialization and the lifecycle of recurring definitions.

use chrono::NaiveDateTime;
use uuid::Uuid;

use wise_domain::{
    end_of_day, truncate_to_millis, EntryDraft, Frequency, Ledger, RecurringDefinition,
    Transaction,
};

use crate::{schedule::advance, CoreError};

/// Result of one materialization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializeOutcome {
    /// Original transactions followed by every emitted occurrence.
    pub transactions: Vec<Transaction>,
    /// All definitions, pointers advanced where occurrences elapsed.
    pub definitions: Vec<RecurringDefinition>,
    /// Number of transactions emitted by this pass.
    pub generated: usize,
}

impl MaterializeOutcome {
    pub fn has_changes(&self) -> bool {
        self.generated > 0
    }

    /// Only the transactions created by this pass.
    pub fn emitted(&self) -> &[Transaction] {
        &self.transactions[self.transactions.len() - self.generated..]
    }
}

/// Expands every due occurrence up to the end of `as_of`'s calendar day.
///
/// An occurrence is due when `next_due_date <= 23:59:59.999` of `as_of`'s day.
/// Each emitted transaction advances its definition by exactly one step, and
/// several missed periods are caught up in one pass. Emitted entries follow
/// the originals in definition-then-occurrence order. Feeding the outcome back
/// in with the same `as_of` emits nothing.
pub fn materialize(
    transactions: &[Transaction],
    definitions: &[RecurringDefinition],
    as_of: NaiveDateTime,
) -> MaterializeOutcome {
    let cutoff = end_of_day(as_of.date());
    let mut emitted = Vec::new();
    let mut advanced = Vec::with_capacity(definitions.len());

    for definition in definitions {
        let mut definition = definition.clone();
        let before = emitted.len();
        while definition.next_due_date <= cutoff {
            let Some(next_due) = advance(definition.next_due_date, definition.frequency) else {
                tracing::warn!(
                    definition = %definition.id,
                    due = %definition.next_due_date,
                    "recurring pointer cannot advance past the calendar range"
                );
                break;
            };
            let occurrence = definition.occurrence();
            tracing::debug!(
                definition = %definition.id,
                date = %occurrence.date,
                "materialized recurring occurrence"
            );
            emitted.push(occurrence);
            definition.next_due_date = next_due;
        }
        if emitted.len() > before {
            tracing::debug!(
                definition = %definition.id,
                count = emitted.len() - before,
                next_due = %definition.next_due_date,
                "advanced recurring pointer"
            );
        }
        advanced.push(definition);
    }

    let generated = emitted.len();
    let mut all = Vec::with_capacity(transactions.len() + generated);
    all.extend_from_slice(transactions);
    all.extend(emitted);

    if generated > 0 {
        tracing::info!(generated, cutoff = %cutoff, "recurring catch-up complete");
    }

    MaterializeOutcome {
        transactions: all,
        definitions: advanced,
        generated,
    }
}

/// Entry created by [`RecurrenceService::record_entry`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEntry {
    pub transaction_id: Uuid,
    pub definition_id: Option<Uuid>,
}

/// User-editable fields of a recurring definition.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionEdit {
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub frequency: Frequency,
    /// Moves the pointer forward (skipping occurrences). Never backwards.
    pub next_due_date: Option<NaiveDateTime>,
}

impl DefinitionEdit {
    pub fn from_definition(definition: &RecurringDefinition) -> Self {
        Self {
            amount: definition.amount,
            category: definition.category.clone(),
            description: definition.description.clone(),
            frequency: definition.frequency,
            next_due_date: None,
        }
    }
}

/// Ledger-level helpers around materialization and recurring definitions.
pub struct RecurrenceService;

impl RecurrenceService {
    /// Runs one materialization pass against the ledger in place.
    pub fn catch_up(ledger: &mut Ledger, as_of: NaiveDateTime) -> usize {
        let outcome = materialize(&ledger.transactions, &ledger.recurring, as_of);
        let generated = outcome.generated;
        if outcome.has_changes() {
            ledger.transactions = outcome.transactions;
            ledger.recurring = outcome.definitions;
        }
        generated
    }

    /// Appends a new entry and, when `frequency` recurs, opens a definition
    /// whose pointer is the second occurrence.
    pub fn record_entry(
        ledger: &mut Ledger,
        draft: EntryDraft,
        frequency: Frequency,
    ) -> Result<RecordedEntry, CoreError> {
        validate_amount(draft.amount)?;
        let transaction = draft.into_transaction();
        let transaction_id = transaction.id;
        let definition_id = if frequency.is_recurring() {
            let next_due = advance(transaction.date, frequency).ok_or_else(|| {
                CoreError::Validation(format!("{} has no next {frequency} occurrence", transaction.date))
            })?;
            let definition = RecurringDefinition::from_initial(&transaction, frequency, next_due);
            let id = definition.id;
            tracing::info!(definition = %id, %frequency, next_due = %next_due, "opened recurring definition");
            ledger.recurring.push(definition);
            Some(id)
        } else {
            None
        };
        ledger.transactions.push(transaction);
        Ok(RecordedEntry {
            transaction_id,
            definition_id,
        })
    }

    /// Applies a user edit. Previously generated transactions are untouched.
    pub fn update_definition(
        ledger: &mut Ledger,
        id: Uuid,
        edit: DefinitionEdit,
    ) -> Result<(), CoreError> {
        validate_amount(edit.amount)?;
        if !edit.frequency.is_recurring() {
            return Err(CoreError::Validation(
                "a recurring definition needs a frequency".into(),
            ));
        }
        if edit.description.trim().is_empty() {
            return Err(CoreError::Validation("description must not be empty".into()));
        }
        let definition = ledger
            .definition_mut(id)
            .ok_or(CoreError::RecurringNotFound(id))?;
        if let Some(next_due) = edit.next_due_date {
            if next_due < definition.next_due_date {
                return Err(CoreError::Validation(format!(
                    "next due date {next_due} is before the current pointer {}",
                    definition.next_due_date
                )));
            }
            definition.next_due_date = truncate_to_millis(next_due);
        }
        definition.amount = edit.amount;
        definition.category = edit.category.trim().to_string();
        definition.description = edit.description.trim().to_string();
        definition.frequency = edit.frequency;
        Ok(())
    }

    /// Stops a recurrence. Transactions it already produced stay in the ledger.
    pub fn cancel_definition(
        ledger: &mut Ledger,
        id: Uuid,
    ) -> Result<RecurringDefinition, CoreError> {
        let index = ledger
            .recurring
            .iter()
            .position(|r| r.id == id)
            .ok_or(CoreError::RecurringNotFound(id))?;
        let removed = ledger.recurring.remove(index);
        tracing::info!(definition = %id, "cancelled recurring definition");
        Ok(removed)
    }
}

fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "amount must be a positive number, got {amount}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wise_domain::{start_of_day, TransactionType};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        start_of_day(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn definition(frequency: Frequency, start: NaiveDateTime, next: NaiveDateTime) -> RecurringDefinition {
        RecurringDefinition {
            id: Uuid::new_v4(),
            amount: 50.0,
            category: "Utilities".into(),
            description: "Internet".into(),
            kind: TransactionType::Expense,
            frequency,
            start_date: start,
            next_due_date: next,
        }
    }

    fn dates(transactions: &[Transaction]) -> Vec<NaiveDateTime> {
        transactions.iter().map(|t| t.date).collect()
    }

    #[test]
    fn weekly_catch_up_includes_occurrence_due_today() {
        let weekly = definition(Frequency::Weekly, at(2024, 1, 1), at(2024, 1, 8));
        let outcome = materialize(&[], &[weekly], at(2024, 1, 22));
        assert_eq!(
            dates(outcome.emitted()),
            vec![at(2024, 1, 8), at(2024, 1, 15), at(2024, 1, 22)]
        );
        assert_eq!(outcome.definitions[0].next_due_date, at(2024, 1, 29));
    }

    #[test]
    fn as_of_time_of_day_does_not_change_the_cutoff() {
        let weekly = definition(Frequency::Weekly, at(2024, 1, 1), at(2024, 1, 8));
        let early = at(2024, 1, 22);
        let late = NaiveDate::from_ymd_opt(2024, 1, 22)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap();
        assert_eq!(
            materialize(&[], &[weekly.clone()], early).generated,
            materialize(&[], &[weekly], late).generated
        );
    }

    #[test]
    fn monthly_catch_up_emits_each_missed_month() {
        let monthly = definition(Frequency::Monthly, at(2024, 1, 10), at(2024, 2, 10));
        let outcome = materialize(&[], &[monthly], at(2024, 4, 20));
        assert_eq!(
            dates(outcome.emitted()),
            vec![at(2024, 2, 10), at(2024, 3, 10), at(2024, 4, 10)]
        );
        assert_eq!(outcome.definitions[0].next_due_date, at(2024, 5, 10));
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let defs = vec![
            definition(Frequency::Daily, at(2024, 1, 1), at(2024, 1, 2)),
            definition(Frequency::Yearly, at(2020, 2, 29), at(2021, 2, 28)),
        ];
        let as_of = at(2024, 3, 1);
        let first = materialize(&[], &defs, as_of);
        let second = materialize(&first.transactions, &first.definitions, as_of);
        assert_eq!(second.generated, 0);
        assert_eq!(second.definitions, first.definitions);
        assert_eq!(second.transactions, first.transactions);
    }

    #[test]
    fn future_definitions_are_returned_unchanged() {
        let future = definition(Frequency::Monthly, at(2024, 5, 1), at(2024, 6, 1));
        let outcome = materialize(&[], &[future.clone()], at(2024, 5, 15));
        assert!(!outcome.has_changes());
        assert_eq!(outcome.definitions, vec![future]);
    }

    #[test]
    fn originals_come_first_then_definition_order() {
        let existing = Transaction::new(TransactionType::Income, 10.0, "Income", "", at(2023, 12, 1));
        let a = definition(Frequency::Weekly, at(2024, 1, 1), at(2024, 1, 8));
        let mut b = definition(Frequency::Daily, at(2024, 1, 1), at(2024, 1, 9));
        b.description = "Coffee".into();
        let outcome = materialize(&[existing.clone()], &[a, b], at(2024, 1, 10));
        assert_eq!(outcome.transactions[0], existing);
        let descriptions: Vec<_> = outcome.emitted().iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Internet", "Coffee", "Coffee"]);
    }

    #[test]
    fn malformed_frequency_still_progresses_daily() {
        let broken = definition(Frequency::None, at(2024, 1, 1), at(2024, 1, 1));
        let outcome = materialize(&[], &[broken], at(2024, 1, 3));
        assert_eq!(outcome.generated, 3);
        assert_eq!(outcome.definitions[0].next_due_date, at(2024, 1, 4));
    }

    #[test]
    fn templates_are_emitted_faithfully_even_with_odd_amounts() {
        let mut refund = definition(Frequency::Monthly, at(2024, 1, 1), at(2024, 2, 1));
        refund.amount = -5.0;
        let outcome = materialize(&[], &[refund], at(2024, 2, 1));
        assert_eq!(outcome.emitted()[0].amount, -5.0);
    }

    #[test]
    fn record_entry_opens_definition_at_second_occurrence() {
        let mut ledger = Ledger::default();
        let draft = EntryDraft::expense(15.0, "Entertainment", at(2024, 1, 31)).with_description("Streaming");
        let recorded = RecurrenceService::record_entry(&mut ledger, draft, Frequency::Monthly).unwrap();
        let definition_id = recorded.definition_id.expect("recurring");
        let definition = ledger.definition(definition_id).unwrap();
        assert_eq!(definition.start_date, at(2024, 1, 31));
        assert_eq!(definition.next_due_date, at(2024, 2, 29));
        assert_eq!(ledger.transactions.len(), 1);

        assert_eq!(RecurrenceService::catch_up(&mut ledger, at(2024, 1, 31)), 0);
    }

    #[test]
    fn record_entry_rejects_non_positive_amounts() {
        let mut ledger = Ledger::default();
        let draft = EntryDraft::expense(0.0, "Food", at(2024, 1, 1));
        let err = RecurrenceService::record_entry(&mut ledger, draft, Frequency::None).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(ledger.transactions.is_empty());
    }

    #[test]
    fn cancelling_keeps_generated_transactions() {
        let mut ledger = Ledger::default();
        let draft = EntryDraft::expense(9.0, "Food", at(2024, 1, 1));
        let recorded = RecurrenceService::record_entry(&mut ledger, draft, Frequency::Daily).unwrap();
        RecurrenceService::catch_up(&mut ledger, at(2024, 1, 5));
        assert_eq!(ledger.transactions.len(), 5);

        RecurrenceService::cancel_definition(&mut ledger, recorded.definition_id.unwrap()).unwrap();
        assert!(ledger.recurring.is_empty());
        assert_eq!(ledger.transactions.len(), 5);
        assert!(matches!(
            RecurrenceService::cancel_definition(&mut ledger, Uuid::new_v4()),
            Err(CoreError::RecurringNotFound(_))
        ));
    }

    #[test]
    fn edits_cannot_move_the_pointer_backwards() {
        let mut ledger = Ledger::default();
        let def = definition(Frequency::Monthly, at(2024, 1, 1), at(2024, 3, 1));
        let id = def.id;
        ledger.recurring.push(def);

        let mut edit = DefinitionEdit::from_definition(ledger.definition(id).unwrap());
        edit.next_due_date = Some(at(2024, 2, 1));
        assert!(RecurrenceService::update_definition(&mut ledger, id, edit.clone()).is_err());

        edit.next_due_date = Some(at(2024, 4, 1));
        edit.amount = 65.0;
        edit.frequency = Frequency::Weekly;
        RecurrenceService::update_definition(&mut ledger, id, edit).unwrap();
        let updated = ledger.definition(id).unwrap();
        assert_eq!(updated.next_due_date, at(2024, 4, 1));
        assert_eq!(updated.amount, 65.0);
        assert_eq!(updated.frequency, Frequency::Weekly);
        assert_eq!(updated.start_date, at(2024, 1, 1));
    }
}
