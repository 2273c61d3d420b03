use crate::domain::ports::{TransactionStore, WalletStore};
use crate::domain::transaction::{Transaction, TransactionId, TransactionStatus};
use crate::domain::wallet::{Balance, Wallet, WalletId};
use crate::error::{MarketError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for storing transaction records.
pub const CF_TRANSACTIONS: &str = "transactions";
/// Column Family for storing wallet records.
pub const CF_WALLETS: &str = "wallets";

impl From<rocksdb::Error> for MarketError {
    fn from(e: rocksdb::Error) -> Self {
        MarketError::StorageError(e.into_string())
    }
}

/// A persistent store implementation using RocksDB.
///
/// Transactions and wallets live in separate Column Families, keyed by the
/// UTF-8 bytes of their identifier, with JSON values.
///
/// `Clone` shares the underlying `Arc<DB>` and the write lock. The lock
/// serializes read-modify-write mutations so a status or balance update never
/// races with another write to the same store.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path, creating the
    /// "transactions" and "wallets" column families when missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_transactions = ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default());
        let cf_wallets = ColumnFamilyDescriptor::new(CF_WALLETS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_transactions, cf_wallets])?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            MarketError::InternalError(Box::new(std::io::Error::other(format!(
                "{} column family not found",
                name
            ))))
        })
    }

    fn put_json<T: Serialize>(&self, cf_name: &str, key: &str, value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let bytes = serde_json::to_vec(value).map_err(|e| {
            MarketError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;
        self.db.put_cf(cf, key.as_bytes(), bytes)?;
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, cf_name: &str, key: &str) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_pinned_cf(cf, key.as_bytes())? {
            Some(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|e| {
                MarketError::InternalError(Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Deserialization error: {}", e),
                )))
            }),
            None => Ok(None),
        }
    }

    fn all_json<T: DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut records = Vec::new();

        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            let record = serde_json::from_slice(&value).map_err(|e| {
                MarketError::InternalError(Box::new(std::io::Error::other(format!(
                    "Failed to deserialize {} record: {}",
                    cf_name, e
                ))))
            })?;
            records.push(record);
        }

        Ok(records)
    }
}

#[async_trait]
impl TransactionStore for RocksDBStore {
    async fn insert(&self, tx: Transaction) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.put_json(CF_TRANSACTIONS, tx.id.as_str(), &tx)
    }

    async fn get(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        self.get_json(CF_TRANSACTIONS, id.as_str())
    }

    async fn all(&self) -> Result<Vec<Transaction>> {
        self.all_json(CF_TRANSACTIONS)
    }

    async fn update_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
    ) -> Result<Transaction> {
        let _guard = self.write_lock.lock().await;
        let mut tx: Transaction = self
            .get_json(CF_TRANSACTIONS, id.as_str())?
            .ok_or_else(|| MarketError::transaction_not_found(id.as_str()))?;
        tx.status = status;
        self.put_json(CF_TRANSACTIONS, id.as_str(), &tx)?;
        Ok(tx)
    }
}

#[async_trait]
impl WalletStore for RocksDBStore {
    async fn insert(&self, wallet: Wallet) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.put_json(CF_WALLETS, wallet.id.as_str(), &wallet)
    }

    async fn get(&self, id: &WalletId) -> Result<Option<Wallet>> {
        self.get_json(CF_WALLETS, id.as_str())
    }

    async fn all(&self) -> Result<Vec<Wallet>> {
        self.all_json(CF_WALLETS)
    }

    async fn set_balance(&self, id: &WalletId, balance: Balance) -> Result<Wallet> {
        let _guard = self.write_lock.lock().await;
        let mut wallet: Wallet = self
            .get_json(CF_WALLETS, id.as_str())?
            .ok_or_else(|| MarketError::wallet_not_found(id.as_str()))?;
        wallet.balance = balance;
        self.put_json(CF_WALLETS, id.as_str(), &wallet)?;
        Ok(wallet)
    }
}
