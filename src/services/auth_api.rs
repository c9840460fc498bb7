//! Upstream auth backend client — login, logout.
//!
//! The gateway never issues or inspects credentials beyond forwarding the
//! login form; the backend owns identity. Failures split into the typed
//! envelope the backend emits ([`ApiError`]) and transport-level noise,
//! which callers normalize into the uniform action envelope.

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::result::ApiError;

/// Successful login payload issued by the auth backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    /// Structured error response from the backend.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Network or decode failure before a structured response existed.
    #[error("backend request failed: {0}")]
    Transport(String),
}

/// Seam for the auth backend; the HTTP client below is the production
/// implementation, tests substitute their own.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, BackendError>;
    async fn logout(&self, token: &str) -> Result<(), BackendError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// The backend's error envelope: `{ "error": { code, message, details } }`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

pub struct HttpAuthBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthBackend {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self::with_base_url(config.api_base_url.clone())
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, BackendError> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .header("Accept", "application/json")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        read_json(response).await
    }

    async fn logout(&self, token: &str) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url("/api/auth/logout"))
            .header("Accept", "application/json")
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(BackendError::Api(error_from_body(status, &body)))
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Api(error_from_body(status, &body)))
    }
}

/// Parse an error response body into the typed [`ApiError`], falling back to
/// the raw text when the envelope does not parse.
fn error_from_body(status: StatusCode, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => ApiError {
            message: envelope
                .error
                .message
                .unwrap_or_else(|| "request failed".to_string()),
            status,
            code: envelope.error.code,
            details: envelope.error.details,
        },
        Err(_) => {
            let message = if body.trim().is_empty() { "request failed" } else { body.trim() };
            ApiError::new(message, status)
        }
    }
}

#[cfg(test)]
#[path = "auth_api_test.rs"]
mod tests;
