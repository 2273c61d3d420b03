//! Process-level configuration.
//!
//! Everything read from the environment is read once, here, at start-up. The
//! rest of the crate receives values explicitly.

use crate::domain::signature::WebhookSecret;
use crate::error::{MarketError, Result};

/// Environment variable holding the payment provider's webhook secret.
pub const SECRET_ENV: &str = "MARKETPAY_WEBHOOK_SECRET";
/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "MARKETPAY_LOG";

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Loads the webhook secret, failing when it is unset or empty.
    pub fn webhook_secret() -> Result<WebhookSecret> {
        let value = std::env::var(SECRET_ENV).map_err(|_| {
            MarketError::InvalidConfiguration(format!("{} is not set", SECRET_ENV))
        })?;
        WebhookSecret::new(value)
    }
}
