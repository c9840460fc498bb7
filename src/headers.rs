//! Security response headers and the per-request CSP nonce.
//!
//! DESIGN
//! ======
//! One random nonce is generated per request, substituted into the CSP
//! `script-src` directive, inserted into request extensions for handlers,
//! and echoed in an `x-nonce` response header so the rendering layer can
//! allow-list its inline script tags. The nonce lives for exactly one
//! request/response cycle. If the OS random source is unavailable the
//! process aborts at the first request; there is no degraded mode without a
//! nonce.

use std::fmt::Write;

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::http::header::{
    CONTENT_SECURITY_POLICY, REFERRER_POLICY, STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS,
    X_FRAME_OPTIONS, X_XSS_PROTECTION,
};
use axum::middleware::Next;
use axum::response::Response;
use rand::Rng;

use crate::config::AppConfig;
use crate::state::AppState;

/// Response header carrying the per-request nonce to the rendering layer.
pub const NONCE_HEADER: &str = "x-nonce";

/// Per-request CSP nonce, available to handlers via request extensions.
#[derive(Debug, Clone)]
pub struct CspNonce(pub String);

/// Generate a cryptographically random 16-byte hex nonce.
#[must_use]
pub fn generate_nonce() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Compose the Content-Security-Policy value for one request.
///
/// `connect-src` is widened with the backend origin and any configured
/// third-party API origins; `script-src` is scoped to the nonce.
#[must_use]
pub fn content_security_policy(config: &AppConfig, nonce: &str) -> String {
    let mut connect_src = String::from("'self' https: wss:");
    let _ = write!(connect_src, " {}", config.api_base_url);
    for origin in &config.connect_src_extra {
        let _ = write!(connect_src, " {origin}");
    }

    format!(
        "default-src 'self'; img-src 'self' data:; script-src 'self' 'nonce-{nonce}'; \
         style-src 'self' 'unsafe-inline'; connect-src {connect_src}"
    )
}

/// Axum middleware stamping every response with the hardening header set.
pub async fn security_headers(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let nonce = generate_nonce();
    request.extensions_mut().insert(CspNonce(nonce.clone()));

    let mut response = next.run(request).await;
    let csp = content_security_policy(&state.config, &nonce);
    let headers = response.headers_mut();

    match HeaderValue::from_str(&csp) {
        Ok(value) => {
            headers.insert(CONTENT_SECURITY_POLICY, value);
        }
        // Only reachable with a non-ASCII origin in config; ship the
        // restrictive baseline rather than no policy at all.
        Err(err) => {
            tracing::error!(error = %err, "composed CSP is not a valid header value");
            headers.insert(CONTENT_SECURITY_POLICY, HeaderValue::from_static("default-src 'self'"));
        }
    }

    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block"));
    headers.insert(
        REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        "permissions-policy",
        HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
    );
    if state.config.production {
        headers.insert(
            STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=63072000; includeSubDomains; preload"),
        );
    }
    if let Ok(value) = HeaderValue::from_str(&nonce) {
        headers.insert(NONCE_HEADER, value);
    }

    response
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod tests;
