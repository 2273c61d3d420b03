use thiserror::Error;

/// Errors surfaced by the stores, the webhook verifier and the settlement flow.
#[derive(Error, Debug)]
pub enum MarketError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid transaction status: {0}")]
    InvalidStatus(String),
    #[error("Invalid balance: {0}")]
    InvalidBalance(String),
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl MarketError {
    pub fn transaction_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Transaction",
            id: id.into(),
        }
    }

    pub fn wallet_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Wallet",
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, MarketError>;
