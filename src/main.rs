use clap::{Parser, Subcommand};
use marketpay::application::ledger::Ledger;
use marketpay::application::settlement::{Settlement, SettlementOutcome};
use marketpay::config::Config;
use marketpay::domain::ports::{TransactionStoreBox, WalletStoreBox};
use marketpay::domain::signature::WebhookVerifier;
use marketpay::domain::transaction::{TransactionId, TransactionStatus};
use marketpay::domain::wallet::{Balance, WalletId};
use marketpay::infrastructure::in_memory::{InMemoryTransactionStore, InMemoryWalletStore};
#[cfg(feature = "storage-rocksdb")]
use marketpay::infrastructure::rocksdb::RocksDBStore;
use marketpay::interfaces::csv::seed_reader::{SeedReader, SeedRecord};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// CSV file of `kind, id, value` rows loaded before the command runs
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a webhook payload against its signature
    Verify {
        #[arg(long)]
        payload: PathBuf,
        #[arg(long)]
        signature: String,
    },
    /// Print the signature of a webhook payload
    Sign {
        #[arg(long)]
        payload: PathBuf,
    },
    /// Overwrite a transaction's status
    SetStatus {
        id: String,
        status: TransactionStatus,
    },
    /// Overwrite a wallet's balance
    SetBalance {
        id: String,
        #[arg(allow_negative_numbers = true)]
        balance: Balance,
    },
    /// Verify a webhook and apply its event to the referenced transaction
    Settle {
        #[arg(long)]
        payload: PathBuf,
        #[arg(long)]
        signature: String,
    },
    /// Print every stored transaction and wallet as JSON lines
    Dump,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = Config::from_env();
    init_logging(&config);

    let cli = Cli::parse();

    match cli.command {
        Command::Verify { payload, signature } => {
            let verifier = WebhookVerifier::new(Config::webhook_secret().into_diagnostic()?);
            let payload = std::fs::read(payload).into_diagnostic()?;
            if verifier.verify(&payload, &signature) {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("invalid");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Sign { payload } => {
            let verifier = WebhookVerifier::new(Config::webhook_secret().into_diagnostic()?);
            let payload = std::fs::read(payload).into_diagnostic()?;
            println!("{}", verifier.sign(&payload));
            Ok(ExitCode::SUCCESS)
        }
        Command::SetStatus { id, status } => {
            let ledger = open_ledger(cli.db_path, cli.seed.as_deref()).await?;
            let tx = ledger
                .update_transaction_status(&TransactionId::new(id), status)
                .await
                .into_diagnostic()?;
            println!("{}", serde_json::to_string(&tx).into_diagnostic()?);
            Ok(ExitCode::SUCCESS)
        }
        Command::SetBalance { id, balance } => {
            let ledger = open_ledger(cli.db_path, cli.seed.as_deref()).await?;
            let wallet = ledger
                .update_wallet_balance(&WalletId::new(id), balance)
                .await
                .into_diagnostic()?;
            println!("{}", serde_json::to_string(&wallet).into_diagnostic()?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Settle { payload, signature } => {
            let verifier = WebhookVerifier::new(Config::webhook_secret().into_diagnostic()?);
            let payload = std::fs::read(payload).into_diagnostic()?;
            let ledger = open_ledger(cli.db_path, cli.seed.as_deref()).await?;
            let settlement = Settlement::new(verifier, ledger);

            let outcome = settlement
                .handle(&payload, &signature)
                .await
                .into_diagnostic()?;
            println!("{}", outcome);
            if outcome == SettlementOutcome::Rejected {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Command::Dump => {
            let ledger = open_ledger(cli.db_path, cli.seed.as_deref()).await?;
            for tx in ledger.transactions().await.into_diagnostic()? {
                println!("{}", serde_json::to_string(&tx).into_diagnostic()?);
            }
            for wallet in ledger.wallets().await.into_diagnostic()? {
                println!("{}", serde_json::to_string(&wallet).into_diagnostic()?);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn open_ledger(db_path: Option<PathBuf>, seed: Option<&Path>) -> Result<Ledger> {
    let (tx_store, wallet_store) = open_stores(db_path)?;
    let ledger = Ledger::new(tx_store, wallet_store);

    if let Some(seed) = seed {
        seed_ledger(&ledger, seed).await?;
    }

    Ok(ledger)
}

#[cfg(feature = "storage-rocksdb")]
fn open_stores(db_path: Option<PathBuf>) -> Result<(TransactionStoreBox, WalletStoreBox)> {
    match db_path {
        Some(db_path) => {
            let store = RocksDBStore::open(db_path).into_diagnostic()?;
            Ok((Box::new(store.clone()), Box::new(store)))
        }
        None => Ok(in_memory_stores()),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_stores(db_path: Option<PathBuf>) -> Result<(TransactionStoreBox, WalletStoreBox)> {
    if let Some(db_path) = db_path {
        warn!(
            path = %db_path.display(),
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(in_memory_stores())
}

fn in_memory_stores() -> (TransactionStoreBox, WalletStoreBox) {
    (
        Box::new(InMemoryTransactionStore::new()),
        Box::new(InMemoryWalletStore::new()),
    )
}

async fn seed_ledger(ledger: &Ledger, path: &Path) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    let mut loaded = 0usize;

    for record in SeedReader::new(file).records() {
        match record {
            Ok(SeedRecord::Transaction(tx)) => {
                ledger.register_transaction(tx).await.into_diagnostic()?;
                loaded += 1;
            }
            Ok(SeedRecord::Wallet(wallet)) => {
                ledger.register_wallet(wallet).await.into_diagnostic()?;
                loaded += 1;
            }
            Err(e) => warn!("Skipping seed row: {}", e),
        }
    }

    info!(loaded, "seed records loaded");
    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .init();
}
