use super::transaction::{Transaction, TransactionId, TransactionStatus};
use super::wallet::{Balance, Wallet, WalletId};
use crate::error::Result;
use async_trait::async_trait;

/// Point-read and point-write access to transaction records.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Inserts or replaces a transaction record.
    async fn insert(&self, tx: Transaction) -> Result<()>;
    async fn get(&self, id: &TransactionId) -> Result<Option<Transaction>>;
    async fn all(&self) -> Result<Vec<Transaction>>;
    /// Overwrites the status of an existing transaction and returns the
    /// updated record. Fails with `NotFound` without writing when `id` is
    /// unknown.
    async fn update_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
    ) -> Result<Transaction>;
}

/// Point-read and point-write access to wallet records.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Inserts or replaces a wallet record.
    async fn insert(&self, wallet: Wallet) -> Result<()>;
    async fn get(&self, id: &WalletId) -> Result<Option<Wallet>>;
    async fn all(&self) -> Result<Vec<Wallet>>;
    /// Overwrites the balance of an existing wallet and returns the updated
    /// record. Fails with `NotFound` without writing when `id` is unknown.
    async fn set_balance(&self, id: &WalletId, balance: Balance) -> Result<Wallet>;
}

pub type TransactionStoreBox = Box<dyn TransactionStore>;
pub type WalletStoreBox = Box<dyn WalletStore>;

pub type TransactionStoreFactory = Box<dyn Fn() -> TransactionStoreBox + Send + Sync>;
pub type WalletStoreFactory = Box<dyn Fn() -> WalletStoreBox + Send + Sync>;
