//! Webhook signature verification.
//!
//! Payment providers sign each webhook body with HMAC-SHA512 under a secret
//! shared with the marketplace and send the lowercase hex digest alongside it.

use crate::error::{MarketError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::fmt;
use subtle::ConstantTimeEq;

type HmacSha512 = Hmac<Sha512>;

/// The shared secret used to sign webhooks.
///
/// Never printed: `Debug` and `Display` show a placeholder.
#[derive(Clone)]
pub struct WebhookSecret(String);

impl WebhookSecret {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(MarketError::InvalidConfiguration(
                "webhook secret must not be empty".to_string(),
            ));
        }
        Ok(Self(value))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(<redacted>)")
    }
}

impl fmt::Display for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Checks webhook payloads against the signature the provider sent.
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    secret: WebhookSecret,
}

impl WebhookVerifier {
    pub fn new(secret: WebhookSecret) -> Self {
        Self { secret }
    }

    /// Lowercase hex HMAC-SHA512 of `payload`.
    pub fn sign(&self, payload: impl AsRef<[u8]>) -> String {
        let mut mac = HmacSha512::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(payload.as_ref());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Returns true only if `signature` equals `sign(payload)` exactly.
    ///
    /// The comparison runs in constant time with respect to the contents of
    /// the two strings.
    pub fn verify(&self, payload: impl AsRef<[u8]>, signature: &str) -> bool {
        let expected = self.sign(payload);
        expected.as_bytes().ct_eq(signature.as_bytes()).into()
    }
}
