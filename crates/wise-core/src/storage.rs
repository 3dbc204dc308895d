use std::sync::Mutex;

use wise_domain::{Ledger, RecurringDefinition, Transaction};

use crate::CoreError;

/// Abstraction over persistence backends holding a single ledger.
///
/// Implementations persist the whole document in one write, which makes
/// [`LedgerStore::commit_materialization`] atomic for both lists.
pub trait LedgerStore: Send + Sync {
    /// Returns an empty default ledger when nothing has been stored yet.
    fn load_ledger(&self) -> Result<Ledger, CoreError>;
    fn save_ledger(&self, ledger: &Ledger) -> Result<(), CoreError>;

    fn load_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        Ok(self.load_ledger()?.transactions)
    }

    fn load_recurring_definitions(&self) -> Result<Vec<RecurringDefinition>, CoreError> {
        Ok(self.load_ledger()?.recurring)
    }

    fn replace_transactions(&self, transactions: Vec<Transaction>) -> Result<(), CoreError> {
        let mut ledger = self.load_ledger()?;
        ledger.transactions = transactions;
        self.save_ledger(&ledger)
    }

    fn replace_recurring_definitions(
        &self,
        definitions: Vec<RecurringDefinition>,
    ) -> Result<(), CoreError> {
        let mut ledger = self.load_ledger()?;
        ledger.recurring = definitions;
        self.save_ledger(&ledger)
    }

    /// Replaces both lists in a single write.
    fn commit_materialization(
        &self,
        transactions: Vec<Transaction>,
        definitions: Vec<RecurringDefinition>,
    ) -> Result<(), CoreError> {
        let mut ledger = self.load_ledger()?;
        ledger.transactions = transactions;
        ledger.recurring = definitions;
        self.save_ledger(&ledger)
    }
}

/// Process-local store, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    ledger: Mutex<Ledger>,
}

impl MemoryLedgerStore {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }

    pub fn snapshot(&self) -> Result<Ledger, CoreError> {
        self.load_ledger()
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load_ledger(&self) -> Result<Ledger, CoreError> {
        self.ledger
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))
    }

    fn save_ledger(&self, ledger: &Ledger) -> Result<(), CoreError> {
        let mut guard = self
            .ledger
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        *guard = ledger.clone();
        Ok(())
    }
}
