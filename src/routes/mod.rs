//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two middleware layers wrap the whole router: the authorization guard
//! (inner) and the security-header injector (outer), so redirects and
//! rewrites produced by the guard are stamped with the hardening headers
//! too. The public marketing site is served as static files via the
//! fallback; it passes the guard untouched.

pub mod auth;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::guard;
use crate::headers::security_headers;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let website_service =
        ServeDir::new(&state.config.website_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/login", get(pages::login_page))
        .route("/admin", get(pages::admin_panel))
        .route("/admin/{*rest}", get(pages::admin_panel))
        .route("/403", get(pages::forbidden))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/healthz", get(healthz))
        .fallback_service(website_service)
        .layer(middleware::from_fn_with_state(state.clone(), guard::guard))
        .layer(middleware::from_fn_with_state(state.clone(), security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
