use std::fmt;

use chrono::NaiveDateTime;
use uuid::Uuid;

use wise_core::{
    materialize, BudgetService, CategoryService, Clock, DefinitionEdit, HistoryGroup,
    HistoryService, LedgerStore, PeriodService, PeriodTotals, RecordedEntry, RecurrenceService,
    SortDirection, SortKey, SubscriptionCost, SubscriptionService, SummaryService,
    TransactionService, TrendPoint, UpcomingCharge,
};
use wise_domain::{
    CategoryBudgetStatus, EntryDraft, Frequency, Ledger, OverallBudget, OverallBudgetStatus,
    PeriodWindow, RecurringDefinition, Timeframe, Transaction,
};

use crate::errors::BudgetError;

/// Host session: owns the in-memory ledger between loads and saves.
///
/// Every materialization pass goes through `&mut self`, so one session never
/// runs two passes at once.
pub struct LedgerManager {
    ledger: Ledger,
    store: Box<dyn LedgerStore>,
    clock: Box<dyn Clock>,
    generated_on_open: usize,
}

impl fmt::Debug for LedgerManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerManager")
            .field("transactions", &self.ledger.transactions.len())
            .field("recurring", &self.ledger.recurring.len())
            .finish()
    }
}

impl LedgerManager {
    /// Loads the ledger and catches up recurring entries through today.
    ///
    /// When the pass emitted anything, both lists are committed in one write
    /// before the session is handed out.
    pub fn open(store: Box<dyn LedgerStore>, clock: Box<dyn Clock>) -> Result<Self, BudgetError> {
        let ledger = store.load_ledger()?;
        tracing::debug!(
            transactions = ledger.transactions.len(),
            recurring = ledger.recurring.len(),
            "ledger loaded"
        );
        let mut manager = Self {
            ledger,
            store,
            clock,
            generated_on_open: 0,
        };
        manager.generated_on_open = manager.catch_up()?;
        Ok(manager)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Occurrences emitted by the pass that ran in [`LedgerManager::open`].
    pub fn generated_on_open(&self) -> usize {
        self.generated_on_open
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Runs a materialization pass and persists its result when it emitted anything.
    pub fn catch_up(&mut self) -> Result<usize, BudgetError> {
        let outcome = materialize(&self.ledger.transactions, &self.ledger.recurring, self.now());
        if !outcome.has_changes() {
            return Ok(0);
        }
        let generated = outcome.generated;
        self.store
            .commit_materialization(outcome.transactions.clone(), outcome.definitions.clone())?;
        self.ledger.transactions = outcome.transactions;
        self.ledger.recurring = outcome.definitions;
        Ok(generated)
    }

    /// Re-runs materialization, then writes the whole ledger.
    pub fn save(&mut self) -> Result<(), BudgetError> {
        let now = self.now();
        RecurrenceService::catch_up(&mut self.ledger, now);
        self.store.save_ledger(&self.ledger)?;
        Ok(())
    }

    pub fn record_entry(
        &mut self,
        draft: EntryDraft,
        frequency: Frequency,
    ) -> Result<RecordedEntry, BudgetError> {
        Ok(RecurrenceService::record_entry(&mut self.ledger, draft, frequency)?)
    }

    pub fn update_definition(&mut self, id: Uuid, edit: DefinitionEdit) -> Result<(), BudgetError> {
        Ok(RecurrenceService::update_definition(&mut self.ledger, id, edit)?)
    }

    pub fn cancel_definition(&mut self, id: Uuid) -> Result<RecurringDefinition, BudgetError> {
        Ok(RecurrenceService::cancel_definition(&mut self.ledger, id)?)
    }

    pub fn update_transaction<F>(&mut self, id: Uuid, mutator: F) -> Result<(), BudgetError>
    where
        F: FnOnce(&mut Transaction),
    {
        Ok(TransactionService::update(&mut self.ledger, id, mutator)?)
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Result<Transaction, BudgetError> {
        Ok(TransactionService::remove(&mut self.ledger, id)?)
    }

    pub fn set_limit(&mut self, category: &str, value: f64) -> Result<(), BudgetError> {
        let category = category.trim();
        if !CategoryService::contains(&self.ledger, category) {
            return Err(wise_core::CoreError::CategoryNotFound(category.to_string()).into());
        }
        BudgetService::set_limit(&mut self.ledger.budget_limits, category, value);
        Ok(())
    }

    pub fn set_overall_budget(&mut self, overall: OverallBudget) {
        self.ledger.overall_budget = overall;
    }

    pub fn add_category(&mut self, name: &str) -> Result<String, BudgetError> {
        Ok(CategoryService::add(&mut self.ledger, name)?)
    }

    pub fn remove_category(&mut self, name: &str) -> Result<(), BudgetError> {
        Ok(CategoryService::remove(&mut self.ledger, name)?)
    }

    /// Resolves a period, rejecting offsets that leave the calendar.
    pub fn window(&self, timeframe: Timeframe, offset: i32) -> Result<PeriodWindow, BudgetError> {
        PeriodService::resolve(timeframe, offset, self.now()).ok_or_else(|| {
            BudgetError::InvalidInput(format!("{timeframe} offset {offset} is out of range"))
        })
    }

    pub fn summary(
        &self,
        timeframe: Timeframe,
        offset: i32,
    ) -> Result<(PeriodWindow, PeriodTotals), BudgetError> {
        let window = self.window(timeframe, offset)?;
        let totals = SummaryService::aggregate(&self.ledger.transactions, &window);
        Ok((window, totals))
    }

    pub fn trend(&self, timeframe: Timeframe, count: usize) -> Vec<TrendPoint> {
        SummaryService::trend(&self.ledger.transactions, timeframe, count, self.now())
    }

    /// Category limits against spending in the current month.
    pub fn category_statuses(&self) -> Vec<CategoryBudgetStatus> {
        match PeriodService::current(Timeframe::Monthly, self.now()) {
            Some(window) => BudgetService::category_statuses(
                &self.ledger.transactions,
                &self.ledger.budget_limits,
                &window,
            ),
            None => Vec::new(),
        }
    }

    pub fn overall_statuses(&self) -> Vec<OverallBudgetStatus> {
        BudgetService::overall_statuses(&self.ledger.transactions, &self.ledger.overall_budget, self.now())
    }

    pub fn subscription_cost(&self) -> SubscriptionCost {
        SubscriptionService::cost(&self.ledger.recurring)
    }

    pub fn upcoming_charges(&self) -> Vec<UpcomingCharge> {
        SubscriptionService::upcoming(&self.ledger.recurring, self.clock.today())
    }

    pub fn history(&self, term: &str, key: SortKey, direction: SortDirection) -> Vec<HistoryGroup> {
        HistoryService::browse(&self.ledger.transactions, term, key, direction)
    }

    pub fn recent(&self, limit: usize) -> Vec<Transaction> {
        HistoryService::recent(&self.ledger.transactions, limit)
    }
}
