//! wise-domain
//!
//! Pure domain models (Transaction, RecurringDefinition, budgets, period windows, Ledger).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod budget;
pub mod common;
pub mod ledger;
pub mod period;
pub mod recurring;
pub mod transaction;

pub use budget::*;
pub use common::*;
pub use ledger::*;
pub use period::*;
pub use recurring::*;
pub use transaction::*;
