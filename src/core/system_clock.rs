use chrono::{Local, NaiveDate, NaiveDateTime};

use wise_core::{Clock, FixedClock};
use wise_domain::{start_of_day, truncate_to_millis};

use crate::{errors::BudgetError, utils::TODAY_ENV};

/// Real-time clock backed by the local wall clock, at millisecond resolution.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        truncate_to_millis(Local::now().naive_local())
    }
}

/// The system clock, or a clock pinned to `BUDGET_WISE_TODAY` (YYYY-MM-DD).
pub fn clock_from_env() -> Result<Box<dyn Clock>, BudgetError> {
    match std::env::var(TODAY_ENV) {
        Ok(raw) if !raw.trim().is_empty() => Ok(Box::new(pinned_clock(&raw)?)),
        _ => Ok(Box::new(SystemClock)),
    }
}

fn pinned_clock(raw: &str) -> Result<FixedClock, BudgetError> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| BudgetError::InvalidInput(format!("{TODAY_ENV} must be YYYY-MM-DD, got `{raw}`")))?;
    Ok(FixedClock(start_of_day(date)))
}
