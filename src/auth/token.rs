//! Token codec and verifier.
//!
//! ARCHITECTURE
//! ============
//! Two tiers, mirroring trust. `decode_unverified` splits the compact token
//! and parses the payload segment without touching the signature; its output
//! drives optimistic UI state only. `TokenVerifier` performs HMAC-SHA256
//! signature and expiry verification and is the sole source of claims for
//! access decisions.
//!
//! TRADE-OFFS
//! ==========
//! The verifier derives its decoding key from the shared secret once, at
//! construction, and holds it for the process lifetime. It is injected
//! through `AppState` rather than read from a global, so tests build fresh
//! verifiers against arbitrary secrets. Every verification failure collapses
//! to `None`: callers cannot distinguish a bad signature from an expired or
//! malformed token, and neither can a probing client.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use super::claims::Claims;
use crate::config::AppConfig;

/// Decode the claims segment of a compact signed token without verifying
/// the signature.
///
/// Returns `None` on malformed structure, base64 or JSON failure, or a
/// non-object payload. Never panics. Carries no trust guarantee.
#[must_use]
pub fn decode_unverified(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    if payload.is_empty() {
        return None;
    }
    // Tolerate padded base64url from non-conforming issuers.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

/// Verifies session tokens against the shared HMAC-SHA256 secret.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Zero leeway: an expired token is expired.
        validation.leeway = 0;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.jwt_secret)
    }

    /// Verify `token` and return trusted claims, or `None` on any failure.
    ///
    /// Fails closed. A rejected token is indistinguishable from an absent
    /// one; the reason is logged server-side only. On success the returned
    /// claims are the decoded payload with the library-verified expiry, so
    /// both the structural and the cryptographic path must agree.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Claims> {
        if token.is_empty() {
            return None;
        }
        // Fast structural fail before any cryptographic work.
        let decoded = decode_unverified(token)?;

        match decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) => {
                let exp = data.claims.exp.or(decoded.exp);
                Some(Claims { exp, ..decoded })
            }
            Err(err) => {
                tracing::debug!(error = %err, "session token verification failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
