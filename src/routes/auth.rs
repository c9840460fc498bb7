//! Auth actions — login, logout, optimistic current-user read.

use axum::Form;
use axum::extract::State;
use axum::response::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::Validate;

use crate::auth::{claims, session};
use crate::result::{
    ActionResult, CODE_UNAUTHORIZED, GENERIC_ERROR, field_errors_from_validation,
};
use crate::services::auth_api::{BackendError, UserInfo};
use crate::state::AppState;

pub const INVALID_CREDENTIALS: &str = "Email atau password salah.";
pub const VALIDATION_MESSAGE: &str = "Periksa kembali data yang diisi.";

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(
        length(min = 1, message = "Email wajib diisi"),
        email(message = "Email tidak valid")
    )]
    pub email: String,
    #[validate(length(min = 8, message = "Password minimal 8 karakter"))]
    pub password: String,
}

/// `POST /api/auth/login` — forward credentials to the backend, persist the
/// issued token in the session cookie, and return the uniform envelope.
///
/// Every failure path clears the cookie; a half-set session never survives a
/// failed login.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> (CookieJar, Json<ActionResult<UserInfo>>) {
    if let Err(errors) = form.validate() {
        let result = ActionResult::failure_with_fields(
            VALIDATION_MESSAGE,
            field_errors_from_validation(&errors),
        );
        return (jar, Json(result));
    }

    match state.auth_api.login(&form.email, &form.password).await {
        Ok(response) => {
            let jar = match session::build_session_cookie(&state.config, &response.access_token) {
                Some(cookie) => jar.add(cookie),
                // Backend handed us an already-expired token; store nothing.
                None => jar.add(session::clear_session_cookie(&state.config)),
            };
            (jar, Json(ActionResult::success(response.user)))
        }
        Err(err) => {
            let jar = jar.add(session::clear_session_cookie(&state.config));
            let result = match &err {
                BackendError::Api(api) if api.has_code(CODE_UNAUTHORIZED) => {
                    ActionResult::failure(INVALID_CREDENTIALS)
                }
                BackendError::Api(api) => ActionResult::from_api_error(api),
                BackendError::Transport(_) => {
                    tracing::error!(error = %err, "login request to backend failed");
                    ActionResult::failure(GENERIC_ERROR)
                }
            };
            (jar, Json(result))
        }
    }
}

/// `POST /api/auth/logout` — best-effort backend invalidation, then an
/// unconditional cookie clear. Never fails from the caller's perspective.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ActionResult<()>>) {
    if let Some(token) = session::session_token(&jar) {
        if let Err(err) = state.auth_api.logout(&token).await {
            tracing::warn!(error = %err, "backend logout failed; clearing cookie anyway");
        }
    }

    let jar = jar.add(session::clear_session_cookie(&state.config));
    (jar, Json(ActionResult::success(())))
}

/// `GET /api/auth/me` — optimistic user snapshot from the *decoded* cookie.
/// UI state only; the guard re-verifies before anything privileged.
pub async fn me(jar: CookieJar) -> Json<Option<claims::CurrentUser>> {
    Json(session::session_token(&jar).as_deref().and_then(claims::current_user))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
