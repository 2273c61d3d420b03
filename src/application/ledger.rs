use crate::domain::ports::{TransactionStoreBox, WalletStoreBox};
use crate::domain::transaction::{Transaction, TransactionId, TransactionStatus};
use crate::domain::wallet::{Balance, Wallet, WalletId};
use crate::error::Result;
use tracing::{info, instrument};

/// Entry point for transaction and wallet mutations.
///
/// Both mutations are unconditional overwrites: the caller computes the new
/// status or balance, the ledger performs no arithmetic and no transition
/// checks. Each call awaits its single write before returning.
pub struct Ledger {
    transaction_store: TransactionStoreBox,
    wallet_store: WalletStoreBox,
}

impl Ledger {
    /// Creates a new `Ledger` over the given stores.
    ///
    /// # Arguments
    ///
    /// * `transaction_store` - The store for transaction records.
    /// * `wallet_store` - The store for wallet records.
    pub fn new(transaction_store: TransactionStoreBox, wallet_store: WalletStoreBox) -> Self {
        Self {
            transaction_store,
            wallet_store,
        }
    }

    /// Sets the status of transaction `id`, returning the updated record.
    ///
    /// Fails with `NotFound` when the transaction does not exist.
    #[instrument(skip_all, fields(id = %id, status = %status))]
    pub async fn update_transaction_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
    ) -> Result<Transaction> {
        let tx = self.transaction_store.update_status(id, status).await?;
        info!("transaction status updated");
        Ok(tx)
    }

    /// Sets the balance of wallet `id`, returning the updated record.
    ///
    /// Fails with `NotFound` when the wallet does not exist.
    #[instrument(skip_all, fields(id = %id, balance = %balance))]
    pub async fn update_wallet_balance(&self, id: &WalletId, balance: Balance) -> Result<Wallet> {
        let wallet = self.wallet_store.set_balance(id, balance).await?;
        info!("wallet balance updated");
        Ok(wallet)
    }

    pub async fn transaction(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        self.transaction_store.get(id).await
    }

    pub async fn wallet(&self, id: &WalletId) -> Result<Option<Wallet>> {
        self.wallet_store.get(id).await
    }

    /// Registers a transaction created elsewhere in the product.
    pub async fn register_transaction(&self, tx: Transaction) -> Result<()> {
        self.transaction_store.insert(tx).await
    }

    /// Registers a wallet created elsewhere in the product.
    pub async fn register_wallet(&self, wallet: Wallet) -> Result<()> {
        self.wallet_store.insert(wallet).await
    }

    pub async fn transactions(&self) -> Result<Vec<Transaction>> {
        self.transaction_store.all().await
    }

    pub async fn wallets(&self) -> Result<Vec<Wallet>> {
        self.wallet_store.all().await
    }
}
