use uuid::Uuid;

use wise_domain::{truncate_to_millis, Ledger, Transaction};

use crate::CoreError;

pub struct TransactionService;

impl TransactionService {
    /// Applies `mutator` to a copy of a stored transaction and keeps it only
    /// when the result is valid. The id cannot change.
    pub fn update<F>(ledger: &mut Ledger, id: Uuid, mutator: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Transaction),
    {
        let stored = ledger
            .transaction_mut(id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        let mut edited = stored.clone();
        mutator(&mut edited);
        edited.id = id;
        edited.date = truncate_to_millis(edited.date);
        if !(edited.amount.is_finite() && edited.amount > 0.0) {
            return Err(CoreError::Validation(format!(
                "amount must be a positive number, got {}",
                edited.amount
            )));
        }
        *stored = edited;
        Ok(())
    }

    /// Deletes one transaction. Recurring definitions are left alone.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<Transaction, CoreError> {
        let index = ledger
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        Ok(ledger.transactions.remove(index))
    }
}
