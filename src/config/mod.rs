//! Configuration wiring for the host: where the config and ledger live.

use std::path::PathBuf;

pub use wise_config::{Config, ConfigError, ConfigManager, Theme};

use crate::{errors::BudgetError, utils};

/// Resolved on-disk locations for one session.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub base: PathBuf,
    pub ledger_root: PathBuf,
}

/// Loads the config under `base` and decides where the ledger document lives.
///
/// An explicit `data_root` in the config wins. Otherwise the ledger sits next
/// to the config when `BUDGET_WISE_HOME` is set, or in the platform data dir.
pub fn load(base: PathBuf) -> Result<(ConfigManager, Config, AppPaths), BudgetError> {
    let manager = ConfigManager::with_base_dir(base.clone())?;
    let config = manager.load()?;
    let ledger_root = match (&config.data_root, utils::env_override()) {
        (Some(root), _) => root.clone(),
        (None, Some(_)) => base.join("data"),
        (None, None) => config.resolve_data_root(),
    };
    Ok((manager, config, AppPaths { base, ledger_root }))
}
