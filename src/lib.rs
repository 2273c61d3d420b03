//! Payment back-office primitives for the marketplace: webhook signature
//! verification, and point-mutations of transaction status and wallet balance.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
