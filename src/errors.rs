use thiserror::Error;

use wise_config::ConfigError;
use wise_core::CoreError;

/// Error type surfaced by the host session and the CLI.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
