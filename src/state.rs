//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into axum handlers and middleware via the `State`
//! extractor. The token verifier derives its decoding key once at startup
//! and is read-only afterwards; it is the only state shared across requests.
//! Every authorization decision is otherwise derived fresh from the incoming
//! cookie.

use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::config::AppConfig;
use crate::services::auth_api::AuthBackend;

/// Shared application state. Clone is required by axum — all inner fields
/// are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub verifier: Arc<TokenVerifier>,
    pub auth_api: Arc<dyn AuthBackend>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, auth_api: Arc<dyn AuthBackend>) -> Self {
        let verifier = TokenVerifier::from_config(&config);
        Self { config: Arc::new(config), verifier: Arc::new(verifier), auth_api }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_state_clones_share_config() {
        let state = test_helpers::test_app_state();
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.config, &clone.config));
        assert!(Arc::ptr_eq(&state.verifier, &clone.verifier));
    }

    #[test]
    fn verifier_accepts_tokens_signed_with_the_configured_secret() {
        let state = test_helpers::test_app_state();
        let exp = time::OffsetDateTime::now_utc().unix_timestamp() + 600;
        let token = test_helpers::mint_token(test_helpers::TEST_SECRET, "u1", &["admin"], Some(exp));
        assert!(state.verifier.verify(&token).is_some());
    }
}
