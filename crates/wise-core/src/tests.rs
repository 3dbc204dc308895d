use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    category_service::CategoryService, history_service::HistoryService, materialize,
    recurrence_service::RecurrenceService, storage::LedgerStore,
    subscription_service::SubscriptionService, summary_service::SummaryService,
    transaction_service::TransactionService, CoreError, MemoryLedgerStore, PeriodService,
};
use wise_domain::{start_of_day, EntryDraft, Frequency, Ledger, Timeframe, TransactionType};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    start_of_day(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

#[test]
fn category_service_rejects_blank_and_duplicate_labels() {
    let mut ledger = Ledger::default();

    let added = CategoryService::add(&mut ledger, "  Pets ").expect("add category");
    assert_eq!(added, "Pets");
    assert!(CategoryService::contains(&ledger, "pets"));

    assert!(matches!(
        CategoryService::add(&mut ledger, "   "),
        Err(CoreError::Validation(_))
    ));
    assert!(matches!(
        CategoryService::add(&mut ledger, "food"),
        Err(CoreError::CategoryExists(_))
    ));
    assert!(matches!(
        CategoryService::add(&mut ledger, "Income"),
        Err(CoreError::CategoryExists(_))
    ));
}

#[test]
fn removing_a_category_keeps_transactions_but_drops_its_limit() {
    let mut ledger = Ledger::default();
    let draft = EntryDraft::expense(20.0, "Health", at(2024, 5, 2));
    RecurrenceService::record_entry(&mut ledger, draft, Frequency::None).expect("record");
    crate::BudgetService::set_limit(&mut ledger.budget_limits, "Health", 100.0);

    CategoryService::remove(&mut ledger, "Health").expect("remove category");
    assert!(!CategoryService::contains(&ledger, "Health"));
    assert!(ledger.limit_for("Health").is_none());
    assert_eq!(ledger.transactions[0].category, "Health");

    assert!(matches!(
        CategoryService::remove(&mut ledger, "Health"),
        Err(CoreError::CategoryNotFound(_))
    ));
}

#[test]
fn transaction_service_updates_and_removes_by_id() {
    let mut ledger = Ledger::default();
    let recorded = RecurrenceService::record_entry(
        &mut ledger,
        EntryDraft::expense(12.0, "Food", at(2024, 5, 2)).with_description("Lunch"),
        Frequency::None,
    )
    .expect("record");
    let id = recorded.transaction_id;

    TransactionService::update(&mut ledger, id, |txn| txn.amount = 14.5).expect("update");
    assert_eq!(ledger.transaction(id).unwrap().amount, 14.5);

    let err = TransactionService::update(&mut ledger, id, |txn| txn.amount = -1.0).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(ledger.transaction(id).unwrap().amount, 14.5);

    let removed = TransactionService::remove(&mut ledger, id).expect("remove");
    assert_eq!(removed.description, "Lunch");
    assert!(matches!(
        TransactionService::remove(&mut ledger, id),
        Err(CoreError::TransactionNotFound(_))
    ));
}

#[test]
fn income_entries_always_file_under_income() {
    let mut ledger = Ledger::default();
    let mut draft = EntryDraft::income(3000.0, at(2024, 5, 1));
    draft.category = "Food".into();
    RecurrenceService::record_entry(&mut ledger, draft, Frequency::Monthly).expect("record");
    assert_eq!(ledger.transactions[0].category, "Income");
    assert_eq!(ledger.transactions[0].description, "Income");
    assert_eq!(ledger.recurring[0].kind, TransactionType::Income);
}

#[test]
fn memory_store_commits_both_lists_together() {
    let store = MemoryLedgerStore::default();
    let mut ledger = Ledger::default();
    RecurrenceService::record_entry(
        &mut ledger,
        EntryDraft::expense(10.0, "Utilities", at(2024, 1, 1)),
        Frequency::Weekly,
    )
    .expect("record");
    store.save_ledger(&ledger).expect("save");

    let transactions = store.load_transactions().expect("transactions");
    let definitions = store.load_recurring_definitions().expect("definitions");
    let outcome = materialize(&transactions, &definitions, at(2024, 1, 22));
    assert_eq!(outcome.generated, 3);
    store
        .commit_materialization(outcome.transactions, outcome.definitions)
        .expect("commit");

    let stored = store.snapshot().expect("snapshot");
    assert_eq!(stored.transactions.len(), 4);
    assert_eq!(stored.recurring[0].next_due_date, at(2024, 1, 29));
    assert_eq!(stored.categories, ledger.categories);
}

#[test]
fn memory_store_replaces_each_list_independently() {
    let mut ledger = Ledger::default();
    ledger.overall_budget.monthly = 500.0;
    RecurrenceService::record_entry(
        &mut ledger,
        EntryDraft::expense(12.0, "Entertainment", at(2024, 2, 1)),
        Frequency::Monthly,
    )
    .expect("record");
    let store = MemoryLedgerStore::new(ledger);

    let lunch = EntryDraft::expense(8.5, "Food", at(2024, 2, 3)).into_transaction();
    store
        .replace_transactions(vec![lunch.clone()])
        .expect("replace transactions");
    let stored = store.snapshot().expect("snapshot");
    assert_eq!(stored.transactions, vec![lunch.clone()]);
    assert_eq!(stored.recurring.len(), 1);
    assert_eq!(stored.overall_budget.monthly, 500.0);

    store
        .replace_recurring_definitions(Vec::new())
        .expect("replace definitions");
    assert!(store.load_recurring_definitions().expect("definitions").is_empty());
    assert_eq!(store.load_transactions().expect("transactions"), vec![lunch]);
    assert_eq!(store.snapshot().expect("snapshot").overall_budget.monthly, 500.0);
}

#[test]
fn dashboard_numbers_line_up_across_services() {
    let mut ledger = Ledger::default();
    RecurrenceService::record_entry(
        &mut ledger,
        EntryDraft::income(2500.0, at(2024, 1, 1)).with_description("Salary"),
        Frequency::Monthly,
    )
    .expect("salary");
    RecurrenceService::record_entry(
        &mut ledger,
        EntryDraft::expense(15.0, "Entertainment", at(2024, 1, 5)).with_description("Streaming"),
        Frequency::Monthly,
    )
    .expect("streaming");
    RecurrenceService::catch_up(&mut ledger, at(2024, 3, 10));

    let now = at(2024, 3, 10);
    let march = SummaryService::current(&ledger.transactions, Timeframe::Monthly, now);
    assert_eq!(march.income, 2500.0);
    assert_eq!(march.expense, 15.0);

    let trend = SummaryService::trend(&ledger.transactions, Timeframe::Monthly, 3, now);
    let incomes: Vec<_> = trend.iter().map(|p| p.totals.income).collect();
    assert_eq!(incomes, vec![2500.0, 2500.0, 2500.0]);

    let cost = SubscriptionService::cost(&ledger.recurring);
    assert_eq!(cost.monthly, 15.0);

    let recent = HistoryService::recent(&ledger.transactions, 2);
    assert_eq!(recent[0].date, at(2024, 3, 5));

    let window = PeriodService::current(Timeframe::Yearly, now).unwrap();
    assert_eq!(
        SummaryService::aggregate(&ledger.transactions, &window).expense,
        45.0
    );
}
