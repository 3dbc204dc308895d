//! wise-core
//!
//! Recurrence materialization and period aggregation for Budget Wise.
//! Depends on wise-domain. No CLI, no terminal I/O, no direct filesystem access.

pub mod budget_service;
pub mod category_service;
pub mod error;
pub mod history_service;
pub mod period_service;
pub mod recurrence_service;
pub mod schedule;
pub mod storage;
pub mod subscription_service;
pub mod summary_service;
pub mod time;
pub mod transaction_service;

pub use budget_service::*;
pub use category_service::*;
pub use error::CoreError;
pub use history_service::*;
pub use period_service::*;
pub use recurrence_service::*;
pub use schedule::advance;
pub use storage::{LedgerStore, MemoryLedgerStore};
pub use subscription_service::*;
pub use summary_service::*;
pub use time::{Clock, FixedClock};
pub use transaction_service::*;

#[cfg(test)]
mod tests;
