use crate::domain::ports::{TransactionStore, WalletStore};
use crate::domain::transaction::{Transaction, TransactionId, TransactionStatus};
use crate::domain::wallet::{Balance, Wallet, WalletId};
use crate::error::{MarketError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for transactions.
///
/// Mutations hold the write lock from lookup to write, so each one is atomic
/// for its record.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<HashMap<TransactionId, Transaction>>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, tx: Transaction) -> Result<()> {
        let mut transactions = self.transactions.write().await;
        transactions.insert(tx.id.clone(), tx);
        Ok(())
    }

    async fn get(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(id).cloned())
    }

    async fn all(&self) -> Result<Vec<Transaction>> {
        let transactions = self.transactions.read().await;
        let mut all: Vec<_> = transactions.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn update_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
    ) -> Result<Transaction> {
        let mut transactions = self.transactions.write().await;
        let tx = transactions
            .get_mut(id)
            .ok_or_else(|| MarketError::transaction_not_found(id.as_str()))?;
        tx.status = status;
        Ok(tx.clone())
    }
}

/// A thread-safe in-memory store for wallets.
#[derive(Default, Clone)]
pub struct InMemoryWalletStore {
    wallets: Arc<RwLock<HashMap<WalletId, Wallet>>>,
}

impl InMemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn insert(&self, wallet: Wallet) -> Result<()> {
        let mut wallets = self.wallets.write().await;
        wallets.insert(wallet.id.clone(), wallet);
        Ok(())
    }

    async fn get(&self, id: &WalletId) -> Result<Option<Wallet>> {
        let wallets = self.wallets.read().await;
        Ok(wallets.get(id).cloned())
    }

    async fn all(&self) -> Result<Vec<Wallet>> {
        let wallets = self.wallets.read().await;
        let mut all: Vec<_> = wallets.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn set_balance(&self, id: &WalletId, balance: Balance) -> Result<Wallet> {
        let mut wallets = self.wallets.write().await;
        let wallet = wallets
            .get_mut(id)
            .ok_or_else(|| MarketError::wallet_not_found(id.as_str()))?;
        wallet.balance = balance;
        Ok(wallet.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_in_memory_transaction_store() {
        let store = InMemoryTransactionStore::new();
        let tx = Transaction::new("tx_1", TransactionStatus::Pending);

        store.insert(tx.clone()).await.unwrap();
        let retrieved = store.get(&"tx_1".into()).await.unwrap().unwrap();
        assert_eq!(retrieved, tx);

        assert!(store.get(&"tx_2".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_status_overwrites() {
        let store = InMemoryTransactionStore::new();
        store
            .insert(Transaction::new("tx_1", TransactionStatus::Success))
            .await
            .unwrap();

        // No transition rules: success may go back to pending.
        let updated = store
            .update_status(&"tx_1".into(), TransactionStatus::Pending)
            .await
            .unwrap();
        assert_eq!(updated.status, TransactionStatus::Pending);

        let retrieved = store.get(&"tx_1".into()).await.unwrap().unwrap();
        assert_eq!(retrieved.status, TransactionStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_status_unknown_id() {
        let store = InMemoryTransactionStore::new();
        let result = store
            .update_status(&"missing".into(), TransactionStatus::Success)
            .await;

        assert!(matches!(result, Err(MarketError::NotFound { kind: "Transaction", .. })));
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_wallet_store() {
        let store = InMemoryWalletStore::new();
        store
            .insert(Wallet::new("w_1", Balance::new(dec!(10))))
            .await
            .unwrap();

        let updated = store
            .set_balance(&"w_1".into(), Balance::new(dec!(150.75)))
            .await
            .unwrap();
        assert_eq!(updated.balance, Balance::new(dec!(150.75)));

        let retrieved = store.get(&"w_1".into()).await.unwrap().unwrap();
        assert_eq!(retrieved.balance.value(), dec!(150.75));
    }

    #[tokio::test]
    async fn test_set_balance_unknown_id() {
        let store = InMemoryWalletStore::new();
        let result = store.set_balance(&"w_9".into(), Balance::ZERO).await;

        assert!(matches!(result, Err(MarketError::NotFound { kind: "Wallet", .. })));
        assert!(store.get(&"w_9".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_all_is_sorted_by_id() {
        let store = InMemoryWalletStore::new();
        for id in ["w_3", "w_1", "w_2"] {
            store.insert(Wallet::new(id, Balance::ZERO)).await.unwrap();
        }

        let ids: Vec<_> = store
            .all()
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.id.to_string())
            .collect();
        assert_eq!(ids, vec!["w_1", "w_2", "w_3"]);
    }
}
