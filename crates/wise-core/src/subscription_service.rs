//! Cost projections and due dates for recurring expenses.

use chrono::NaiveDate;

use wise_domain::{Frequency, RecurringDefinition};

/// Average days per month used to scale daily charges.
pub const DAYS_PER_MONTH: f64 = 30.42;
/// Average weeks per month used to scale weekly charges.
pub const WEEKS_PER_MONTH: f64 = 4.34;

/// Projected cost of all recurring expenses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubscriptionCost {
    pub monthly: f64,
    pub yearly: f64,
}

/// A recurring expense with its distance from today.
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingCharge {
    pub definition: RecurringDefinition,
    /// Calendar days until the next charge. Negative when overdue.
    pub days_until: i64,
}

pub struct SubscriptionService;

impl SubscriptionService {
    /// Monthly-equivalent amount of one definition.
    pub fn monthly_equivalent(definition: &RecurringDefinition) -> f64 {
        match definition.frequency {
            Frequency::Daily => definition.amount * DAYS_PER_MONTH,
            Frequency::Weekly => definition.amount * WEEKS_PER_MONTH,
            Frequency::Monthly => definition.amount,
            Frequency::Yearly => definition.amount / 12.0,
            Frequency::None => 0.0,
        }
    }

    /// Sums expense definitions only; income templates are ignored.
    pub fn cost(definitions: &[RecurringDefinition]) -> SubscriptionCost {
        let monthly: f64 = definitions
            .iter()
            .filter(|d| d.is_expense())
            .map(Self::monthly_equivalent)
            .sum();
        SubscriptionCost {
            monthly,
            yearly: monthly * 12.0,
        }
    }

    pub fn days_until(definition: &RecurringDefinition, today: NaiveDate) -> i64 {
        (definition.next_due_date.date() - today).num_days()
    }

    /// Expense definitions ordered by next due date.
    pub fn upcoming(definitions: &[RecurringDefinition], today: NaiveDate) -> Vec<UpcomingCharge> {
        let mut charges: Vec<_> = definitions
            .iter()
            .filter(|d| d.is_expense())
            .map(|definition| UpcomingCharge {
                days_until: Self::days_until(definition, today),
                definition: definition.clone(),
            })
            .collect();
        charges.sort_by_key(|charge| charge.definition.next_due_date);
        charges
    }
}
