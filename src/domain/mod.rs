//! Domain types and the storage ports the application layer depends on.

pub mod ports;
pub mod signature;
pub mod transaction;
pub mod wallet;
