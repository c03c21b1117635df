use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Invalid backup file format: {0}")]
    MalformedBackup(String),
    #[error("Malformed CSV line {line}: {reason}")]
    MalformedCsvLine { line: u64, reason: String },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
