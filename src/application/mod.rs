//! Application layer orchestrating the domain.
//!
//! [`ledger::Ledger`] owns the storage backends and exposes the transaction
//! status and wallet balance mutations. [`settlement::Settlement`] gates the
//! status mutation behind webhook signature verification.

pub mod ledger;
pub mod settlement;
