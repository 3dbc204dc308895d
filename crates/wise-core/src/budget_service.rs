//! Category limits and overall caps compared with actual spending.

use chrono::NaiveDateTime;

use wise_domain::{
    BudgetLimit, BudgetTotals, CategoryBudgetStatus, OverallBudget, OverallBudgetStatus,
    PeriodWindow, Timeframe, Transaction,
};

use crate::{period_service::PeriodService, summary_service::SummaryService};

pub struct BudgetService;

impl BudgetService {
    /// Replaces the limit for `category`; a non-positive value removes it.
    pub fn set_limit(limits: &mut Vec<BudgetLimit>, category: &str, value: f64) {
        limits.retain(|l| l.category != category);
        if value.is_finite() && value > 0.0 {
            limits.push(BudgetLimit::new(category, value));
        }
    }

    /// Spending per limited category within `window`, in limit order.
    pub fn category_statuses(
        transactions: &[Transaction],
        limits: &[BudgetLimit],
        window: &PeriodWindow,
    ) -> Vec<CategoryBudgetStatus> {
        let spent = SummaryService::aggregate_by_category(transactions, window);
        limits
            .iter()
            .map(|limit| CategoryBudgetStatus {
                category: limit.category.clone(),
                window: window.clone(),
                totals: BudgetTotals::from_parts(
                    limit.limit,
                    spent.get(&limit.category).copied().unwrap_or(0.0),
                ),
            })
            .collect()
    }

    /// Expenses of the current day, month and year against each configured cap.
    pub fn overall_statuses(
        transactions: &[Transaction],
        overall: &OverallBudget,
        reference_now: NaiveDateTime,
    ) -> Vec<OverallBudgetStatus> {
        [Timeframe::Daily, Timeframe::Monthly, Timeframe::Yearly]
            .into_iter()
            .filter_map(|timeframe| {
                let cap = overall.cap(timeframe)?;
                let window = PeriodService::current(timeframe, reference_now)?;
                let spent = SummaryService::aggregate(transactions, &window).expense;
                Some(OverallBudgetStatus {
                    timeframe,
                    window,
                    totals: BudgetTotals::from_parts(cap, spent),
                })
            })
            .collect()
    }
}
