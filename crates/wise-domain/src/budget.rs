//! Budget caps and the totals used to compare spending against them.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::period::{PeriodWindow, Timeframe};

/// Spending cap for a single category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetLimit {
    pub category: String,
    pub limit: f64,
}

impl BudgetLimit {
    pub fn new(category: impl Into<String>, limit: f64) -> Self {
        Self {
            category: category.into(),
            limit,
        }
    }
}

/// Ledger-wide caps. Zero means no cap for that timeframe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct OverallBudget {
    #[serde(default)]
    pub daily: f64,
    #[serde(default)]
    pub monthly: f64,
    #[serde(default)]
    pub yearly: f64,
}

impl OverallBudget {
    /// Returns the configured cap for `timeframe`, if any.
    pub fn cap(&self, timeframe: Timeframe) -> Option<f64> {
        let value = match timeframe {
            Timeframe::Daily => self.daily,
            Timeframe::Monthly => self.monthly,
            Timeframe::Yearly => self.yearly,
            Timeframe::Weekly => return None,
        };
        (value > 0.0).then_some(value)
    }

    pub fn is_empty(&self) -> bool {
        [Timeframe::Daily, Timeframe::Monthly, Timeframe::Yearly]
            .iter()
            .all(|tf| self.cap(*tf).is_none())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Aggregated totals for a single budgeting bucket.
pub struct BudgetTotals {
    pub budgeted: f64,
    pub spent: f64,
    pub remaining: f64,
    pub variance: f64,
    pub percent_used: Option<f64>,
    pub status: BudgetStatus,
}

impl BudgetTotals {
    pub fn from_parts(budgeted: f64, spent: f64) -> Self {
        let remaining = budgeted - spent;
        let variance = spent - budgeted;
        let percent_used = if budgeted.abs() > f64::EPSILON {
            Some((spent / budgeted) * 100.0)
        } else if spent.abs() > f64::EPSILON {
            Some(100.0)
        } else {
            None
        };
        let status = if budgeted.abs() < f64::EPSILON && spent.abs() < f64::EPSILON {
            BudgetStatus::Empty
        } else {
            match spent.partial_cmp(&budgeted).unwrap_or(Ordering::Equal) {
                Ordering::Greater => BudgetStatus::OverBudget,
                Ordering::Less => BudgetStatus::UnderBudget,
                Ordering::Equal => BudgetStatus::OnTrack,
            }
        };
        Self {
            budgeted,
            spent,
            remaining,
            variance,
            percent_used,
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Describes whether spending is aligned with the cap.
pub enum BudgetStatus {
    OnTrack,
    OverBudget,
    UnderBudget,
    Empty,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::OverBudget => "Over Budget",
            BudgetStatus::UnderBudget => "Under Budget",
            BudgetStatus::Empty => "Empty",
        };
        f.write_str(label)
    }
}

/// Category spending compared with its limit for one window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBudgetStatus {
    pub category: String,
    pub window: PeriodWindow,
    pub totals: BudgetTotals,
}

/// Ledger-wide spending for one timeframe compared with its cap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverallBudgetStatus {
    pub timeframe: Timeframe,
    pub window: PeriodWindow,
    pub totals: BudgetTotals,
}
