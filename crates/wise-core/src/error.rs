use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Recurring definition not found: {0}")]
    RecurringNotFound(Uuid),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Category already exists: {0}")]
    CategoryExists(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
