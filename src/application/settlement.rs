use crate::application::ledger::Ledger;
use crate::domain::signature::WebhookVerifier;
use crate::domain::transaction::{Transaction, TransactionId, TransactionStatus};
use crate::error::{MarketError, Result};
use serde::Deserialize;
use std::fmt;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    event: String,
    data: WebhookData,
}

#[derive(Debug, Deserialize)]
struct WebhookData {
    reference: String,
}

/// What happened to an inbound webhook.
#[derive(Debug, PartialEq, Clone)]
pub enum SettlementOutcome {
    /// The signature did not match; nothing was read or written.
    Rejected,
    /// Authentic, but the event does not map to a transaction status.
    Ignored(String),
    /// The referenced transaction now carries the event's status.
    Applied(Transaction),
}

impl fmt::Display for SettlementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementOutcome::Rejected => write!(f, "rejected"),
            SettlementOutcome::Ignored(event) => write!(f, "ignored {}", event),
            SettlementOutcome::Applied(tx) => write!(f, "applied {} {}", tx.id, tx.status),
        }
    }
}

/// Maps a provider event name to the status it settles a transaction into.
///
/// Only the suffix matters, so `charge.success` and `transfer.success` both
/// map to `Success`.
pub fn status_for_event(event: &str) -> Option<TransactionStatus> {
    let (_, outcome) = event.rsplit_once('.')?;
    match outcome {
        "success" => Some(TransactionStatus::Success),
        "failed" => Some(TransactionStatus::Failed),
        "reversed" | "cancelled" => Some(TransactionStatus::Cancelled),
        "pending" => Some(TransactionStatus::Pending),
        _ => None,
    }
}

/// Applies authenticated payment-provider webhooks to the ledger.
pub struct Settlement {
    verifier: WebhookVerifier,
    ledger: Ledger,
}

impl Settlement {
    pub fn new(verifier: WebhookVerifier, ledger: Ledger) -> Self {
        Self { verifier, ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Verifies `payload` against `signature` and, when authentic, sets the
    /// referenced transaction's status from the event name.
    ///
    /// Unknown transactions fail with `NotFound`; unparseable payloads with
    /// `InvalidPayload`.
    pub async fn handle(&self, payload: &[u8], signature: &str) -> Result<SettlementOutcome> {
        if !self.verifier.verify(payload, signature) {
            warn!("webhook rejected: signature mismatch");
            return Ok(SettlementOutcome::Rejected);
        }

        let event: WebhookEvent = serde_json::from_slice(payload)
            .map_err(|e| MarketError::InvalidPayload(e.to_string()))?;

        let Some(status) = status_for_event(&event.event) else {
            info!(event = %event.event, "webhook ignored");
            return Ok(SettlementOutcome::Ignored(event.event));
        };

        let id = TransactionId::new(event.data.reference);
        let tx = self.ledger.update_transaction_status(&id, status).await?;
        info!(event = %event.event, id = %tx.id, "webhook applied");
        Ok(SettlementOutcome::Applied(tx))
    }
}
