//! Search, ordering and grouping of the transaction history.

use std::cmp::Ordering;

use wise_domain::Transaction;

pub const ALL_TRANSACTIONS_GROUP: &str = "All Transactions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Titled slice of the history, e.g. "March 2024".
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryGroup {
    pub title: String,
    pub transactions: Vec<Transaction>,
}

pub struct HistoryService;

impl HistoryService {
    /// Case-insensitive match on description or category. Blank terms match everything.
    pub fn search(transactions: &[Transaction], term: &str) -> Vec<Transaction> {
        let needle = term.trim().to_lowercase();
        transactions
            .iter()
            .filter(|t| {
                needle.is_empty()
                    || t.description.to_lowercase().contains(&needle)
                    || t.category.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub fn sort(transactions: &mut [Transaction], key: SortKey, direction: SortDirection) {
        transactions.sort_by(|a, b| {
            let ordering = match key {
                SortKey::Date => a.date.cmp(&b.date),
                SortKey::Amount => a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal),
            };
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    /// Filters, sorts and groups in one step, the way the history screen lists entries.
    pub fn browse(
        transactions: &[Transaction],
        term: &str,
        key: SortKey,
        direction: SortDirection,
    ) -> Vec<HistoryGroup> {
        let mut matches = Self::search(transactions, term);
        Self::sort(&mut matches, key, direction);
        Self::group_by_month(matches, key)
    }

    /// Groups an already sorted list: by month when sorted by date, otherwise one group.
    pub fn group_by_month(sorted: Vec<Transaction>, key: SortKey) -> Vec<HistoryGroup> {
        if sorted.is_empty() {
            return Vec::new();
        }
        if key == SortKey::Amount {
            return vec![HistoryGroup {
                title: ALL_TRANSACTIONS_GROUP.into(),
                transactions: sorted,
            }];
        }
        let mut groups: Vec<HistoryGroup> = Vec::new();
        for txn in sorted {
            let title = txn.date.format("%B %Y").to_string();
            match groups.iter_mut().find(|g| g.title == title) {
                Some(group) => group.transactions.push(txn),
                None => groups.push(HistoryGroup {
                    title,
                    transactions: vec![txn],
                }),
            }
        }
        groups
    }

    /// The `limit` most recent transactions, newest first.
    pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
        let mut sorted = transactions.to_vec();
        Self::sort(&mut sorted, SortKey::Date, SortDirection::Desc);
        sorted.truncate(limit);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use wise_domain::{start_of_day, TransactionType};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        start_of_day(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new(TransactionType::Expense, 12.0, "Food", "Pizza night", at(2024, 3, 3)),
            Transaction::new(TransactionType::Expense, 60.0, "Transport", "Train pass", at(2024, 2, 14)),
            Transaction::new(TransactionType::Income, 2500.0, "Income", "Salary", at(2024, 3, 1)),
            Transaction::new(TransactionType::Expense, 8.0, "Food", "", at(2024, 2, 2)),
        ]
    }

    #[test]
    fn search_matches_description_or_category_ignoring_case() {
        let found = HistoryService::search(&sample(), "FOOD");
        assert_eq!(found.len(), 2);
        let found = HistoryService::search(&sample(), "pass");
        assert_eq!(found[0].description, "Train pass");
        assert_eq!(HistoryService::search(&sample(), "  ").len(), 4);
    }

    #[test]
    fn date_sort_groups_by_month_in_order() {
        let groups = HistoryService::browse(&sample(), "", SortKey::Date, SortDirection::Desc);
        let titles: Vec<_> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["March 2024", "February 2024"]);
        assert_eq!(groups[0].transactions[0].description, "Pizza night");
    }

    #[test]
    fn amount_sort_uses_single_group() {
        let groups = HistoryService::browse(&sample(), "", SortKey::Amount, SortDirection::Asc);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, ALL_TRANSACTIONS_GROUP);
        let amounts: Vec<_> = groups[0].transactions.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![8.0, 12.0, 60.0, 2500.0]);
    }

    #[test]
    fn recent_returns_newest_first() {
        let recent = HistoryService::recent(&sample(), 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, at(2024, 3, 3));
        assert_eq!(recent[1].date, at(2024, 3, 1));
        assert!(HistoryService::browse(&[], "x", SortKey::Date, SortDirection::Desc).is_empty());
    }
}
