pub mod ledger_manager;
pub mod system_clock;

pub use ledger_manager::LedgerManager;
pub use system_clock::{clock_from_env, SystemClock};
