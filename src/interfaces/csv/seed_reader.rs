use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::domain::wallet::{Balance, Wallet};
use crate::error::{MarketError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum SeedKind {
    Transaction,
    Wallet,
}

#[derive(Debug, Deserialize)]
struct SeedRow {
    kind: SeedKind,
    id: String,
    value: String,
}

/// A record created outside this crate, loaded into a store before use.
#[derive(Debug, PartialEq, Clone)]
pub enum SeedRecord {
    Transaction(Transaction),
    Wallet(Wallet),
}

impl SeedRow {
    fn into_record(self) -> Result<SeedRecord> {
        match self.kind {
            SeedKind::Transaction => {
                let status: TransactionStatus = self.value.parse()?;
                Ok(SeedRecord::Transaction(Transaction::new(self.id.as_str(), status)))
            }
            SeedKind::Wallet => {
                let balance: Balance = self.value.parse()?;
                Ok(SeedRecord::Wallet(Wallet::new(self.id.as_str(), balance)))
            }
        }
    }
}

/// Reads seed records from a CSV source with a `kind, id, value` header.
///
/// `kind` is `transaction` or `wallet`; `value` is a status name or a decimal
/// balance respectively. Fields are trimmed.
pub struct SeedReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> SeedReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields one result per row; a bad row does not stop the stream.
    pub fn records(self) -> impl Iterator<Item = Result<SeedRecord>> {
        self.reader
            .into_deserialize()
            .map(|result: csv::Result<SeedRow>| -> Result<SeedRecord> {
                result.map_err(MarketError::from)?.into_record()
            })
    }
}
