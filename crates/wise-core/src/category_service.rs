use wise_domain::{Ledger, INCOME_CATEGORY};

use crate::CoreError;

pub struct CategoryService;

impl CategoryService {
    /// Adds a trimmed category label. Labels compare case-insensitively.
    pub fn add(ledger: &mut Ledger, name: &str) -> Result<String, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("category name must not be empty".into()));
        }
        if name.eq_ignore_ascii_case(INCOME_CATEGORY) || Self::position(ledger, name).is_some() {
            return Err(CoreError::CategoryExists(name.to_string()));
        }
        ledger.categories.push(name.to_string());
        tracing::debug!(category = name, "added category");
        Ok(name.to_string())
    }

    /// Removes a category label and any limit attached to it.
    ///
    /// Existing transactions keep their label.
    pub fn remove(ledger: &mut Ledger, name: &str) -> Result<(), CoreError> {
        let index = Self::position(ledger, name.trim())
            .ok_or_else(|| CoreError::CategoryNotFound(name.trim().to_string()))?;
        let removed = ledger.categories.remove(index);
        ledger.budget_limits.retain(|l| l.category != removed);
        Ok(())
    }

    pub fn contains(ledger: &Ledger, name: &str) -> bool {
        Self::position(ledger, name.trim()).is_some()
    }

    fn position(ledger: &Ledger, name: &str) -> Option<usize> {
        ledger
            .categories
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }
}
