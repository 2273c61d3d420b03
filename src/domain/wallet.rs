use crate::error::MarketError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of a user's wallet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletId(String);

impl WalletId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WalletId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A signed monetary value.
///
/// Wraps `rust_decimal::Decimal` so balances keep their exact decimal
/// representation: `150.75` is stored and read back as `150.75`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(pub Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Balance {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Balance {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .map(Self)
            .map_err(|e| MarketError::InvalidBalance(format!("{}: {}", s, e)))
    }
}

/// A stored balance associated with a user.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Wallet {
    pub id: WalletId,
    pub balance: Balance,
}

impl Wallet {
    pub fn new(id: impl Into<WalletId>, balance: Balance) -> Self {
        Self {
            id: id.into(),
            balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_parsing_keeps_precision() {
        let balance: Balance = "150.75".parse().unwrap();
        assert_eq!(balance, Balance::new(dec!(150.75)));
        assert_eq!(balance.to_string(), "150.75");

        let negative: Balance = "-3.5".parse().unwrap();
        assert_eq!(negative.value(), dec!(-3.5));

        assert!(matches!(
            "a lot".parse::<Balance>(),
            Err(MarketError::InvalidBalance(_))
        ));
    }

    #[test]
    fn test_wallet_serialization() {
        let wallet = Wallet::new("w_1", Balance::new(dec!(150.75)));
        let json = serde_json::to_string(&wallet).unwrap();
        assert_eq!(json, r#"{"id":"w_1","balance":"150.75"}"#);

        let back: Wallet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.balance, Balance::new(dec!(150.75)));
    }
}
