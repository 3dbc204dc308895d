//! Income, expense and balance totals over period windows.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use wise_domain::{PeriodWindow, Timeframe, Transaction, TransactionType};

use crate::period_service::PeriodService;

/// Totals for one window. `balance` is always `income - expense`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeriodTotals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl PeriodTotals {
    fn from_sums(income: f64, expense: f64) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

/// Totals paired with the window they were computed for, for trend charts.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub window: PeriodWindow,
    pub totals: PeriodTotals,
}

pub struct SummaryService;

impl SummaryService {
    /// Sums transactions whose timestamp lies within the inclusive window.
    pub fn aggregate(transactions: &[Transaction], window: &PeriodWindow) -> PeriodTotals {
        let (income, expense) = in_window(transactions, window).fold(
            (0.0, 0.0),
            |(income, expense), txn| match txn.kind {
                TransactionType::Income => (income + txn.amount, expense),
                TransactionType::Expense => (income, expense + txn.amount),
            },
        );
        PeriodTotals::from_sums(income, expense)
    }

    /// Expense totals per category label within the window.
    pub fn aggregate_by_category(
        transactions: &[Transaction],
        window: &PeriodWindow,
    ) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for txn in in_window(transactions, window).filter(|t| !t.is_income()) {
            *totals.entry(txn.category.clone()).or_insert(0.0) += txn.amount;
        }
        totals
    }

    /// Totals for the current period of `timeframe`; zero when the period
    /// cannot be resolved.
    pub fn current(
        transactions: &[Transaction],
        timeframe: Timeframe,
        reference_now: NaiveDateTime,
    ) -> PeriodTotals {
        PeriodService::current(timeframe, reference_now)
            .map(|window| Self::aggregate(transactions, &window))
            .unwrap_or_default()
    }

    /// One point per window of a contiguous series ending at the current period.
    pub fn trend(
        transactions: &[Transaction],
        timeframe: Timeframe,
        count: usize,
        reference_now: NaiveDateTime,
    ) -> Vec<TrendPoint> {
        PeriodService::series(timeframe, count, reference_now)
            .into_iter()
            .map(|window| TrendPoint {
                totals: Self::aggregate(transactions, &window),
                window,
            })
            .collect()
    }
}

fn in_window<'a>(
    transactions: &'a [Transaction],
    window: &'a PeriodWindow,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions.iter().filter(move |txn| window.contains(txn.date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wise_domain::{end_of_day, start_of_day};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(kind: TransactionType, amount: f64, category: &str, date: NaiveDateTime) -> Transaction {
        Transaction::new(kind, amount, category, "", date)
    }

    fn march() -> PeriodWindow {
        PeriodService::resolve(Timeframe::Monthly, 0, start_of_day(ymd(2024, 3, 10))).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(TransactionType::Income, 3000.0, "Income", start_of_day(ymd(2024, 3, 1))),
            txn(TransactionType::Expense, 1200.0, "Housing", start_of_day(ymd(2024, 3, 1))),
            txn(TransactionType::Expense, 80.5, "Food", end_of_day(ymd(2024, 3, 31))),
            txn(TransactionType::Expense, 19.5, "Food", ymd(2024, 3, 12).and_hms_opt(9, 0, 0).unwrap()),
            txn(TransactionType::Expense, 999.0, "Shopping", start_of_day(ymd(2024, 4, 1))),
            txn(TransactionType::Income, 50.0, "Income", end_of_day(ymd(2024, 2, 29))),
        ]
    }

    #[test]
    fn empty_input_yields_zero_totals() {
        assert_eq!(SummaryService::aggregate(&[], &march()), PeriodTotals::default());
        assert!(SummaryService::aggregate_by_category(&[], &march()).is_empty());
    }

    #[test]
    fn includes_both_window_boundaries_by_timestamp() {
        let totals = SummaryService::aggregate(&sample(), &march());
        assert_eq!(totals.income, 3000.0);
        assert_eq!(totals.expense, 1300.0);
        assert_eq!(totals.balance, 1700.0);
    }

    #[test]
    fn partition_by_type_reproduces_totals() {
        let all = sample();
        let (income, expense): (Vec<_>, Vec<_>) = all.iter().cloned().partition(|t| t.is_income());
        let whole = SummaryService::aggregate(&all, &march());
        let income_only = SummaryService::aggregate(&income, &march());
        let expense_only = SummaryService::aggregate(&expense, &march());
        assert_eq!(whole.income, income_only.income + expense_only.income);
        assert_eq!(whole.expense, income_only.expense + expense_only.expense);
        assert_eq!(whole.balance, whole.income - whole.expense);
    }

    #[test]
    fn category_breakdown_counts_expenses_only() {
        let breakdown = SummaryService::aggregate_by_category(&sample(), &march());
        assert_eq!(breakdown.get("Food"), Some(&100.0));
        assert_eq!(breakdown.get("Housing"), Some(&1200.0));
        assert!(!breakdown.contains_key("Income"));
        assert!(!breakdown.contains_key("Shopping"));
    }

    #[test]
    fn trend_covers_each_window_once() {
        let points = SummaryService::trend(&sample(), Timeframe::Monthly, 3, start_of_day(ymd(2024, 4, 5)));
        let labels: Vec<_> = points.iter().map(|p| p.window.label.as_str()).collect();
        assert_eq!(labels, vec!["February 2024", "March 2024", "April 2024"]);
        assert_eq!(points[0].totals.income, 50.0);
        assert_eq!(points[1].totals.expense, 1300.0);
        assert_eq!(points[2].totals.expense, 999.0);
    }

    #[test]
    fn last_millisecond_of_a_period_is_counted_once() {
        let late = ymd(2024, 3, 31).and_hms_micro_opt(23, 59, 59, 999_500).unwrap();
        let transactions = vec![txn(TransactionType::Expense, 25.0, "Food", late)];
        let now = start_of_day(ymd(2024, 4, 2));
        for timeframe in [Timeframe::Daily, Timeframe::Monthly] {
            let total: f64 = SummaryService::trend(&transactions, timeframe, 5, now)
                .iter()
                .map(|p| p.totals.expense)
                .sum();
            assert_eq!(total, 25.0, "{timeframe}");
        }
    }

    #[test]
    fn offset_timestamps_land_in_the_local_period() {
        use chrono::{Local, SecondsFormat, TimeZone, Utc};
        use wise_domain::iso_timestamp;

        let local_midnight = start_of_day(ymd(2024, 3, 1));
        let written = Local
            .from_local_datetime(&local_midnight)
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        let date = iso_timestamp::parse(&written).unwrap();
        let transactions = vec![txn(TransactionType::Expense, 900.0, "Housing", date)];
        assert_eq!(SummaryService::aggregate(&transactions, &march()).expense, 900.0);
    }
}
