//! Request authorization guard.
//!
//! ARCHITECTURE
//! ============
//! Every request is classified into one of three route classes and reduced
//! to a [`Decision`] before any handler runs. The decision is derived fresh
//! per request from the session cookie; nothing is cached across requests.
//! [`decide`] is a pure function over the classification and the (possibly
//! verified) claims; [`guard`] is the axum middleware that translates its
//! outcome into redirects, rewrites, and cookie mutations.
//!
//! TRADE-OFFS
//! ==========
//! Protected routes treat a missing token and an unverifiable token
//! identically: both redirect to login and drop the cookie. The login route
//! is deliberately lenient: an unverifiable cookie still gets the login form
//! (after the dead cookie is cleared), so an expired session can always
//! re-authenticate. A role mismatch on a protected route is a 403 rewrite
//! that leaves the session untouched; a later role grant must not require a
//! fresh login.

use axum::extract::{Request, State};
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use super::claims::{Claims, Role};
use super::session;
use crate::state::AppState;

pub const ADMIN_PREFIX: &str = "/admin";
pub const LOGIN_PATH: &str = "/login";
pub const FORBIDDEN_PATH: &str = "/403";

// =============================================================================
// ROUTE CLASSIFICATION
// =============================================================================

/// Route classes the guard distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Admin-prefixed paths; require a verified admin session.
    Protected,
    /// The sign-in page; gated in the other direction.
    Login,
    /// Everything else; always allowed.
    Public,
}

impl RouteClass {
    #[must_use]
    pub fn classify(path: &str) -> Self {
        if path == ADMIN_PREFIX || path.starts_with("/admin/") {
            RouteClass::Protected
        } else if path == LOGIN_PATH {
            RouteClass::Login
        } else {
            RouteClass::Public
        }
    }
}

// =============================================================================
// DECISION
// =============================================================================

/// Outcome of the per-request authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Let the request through unchanged.
    Allow,
    /// Send the client to the login page.
    RedirectToLogin,
    /// Serve the forbidden page, status 403, at the original URL.
    RewriteToForbidden,
    /// Already authenticated: bounce away from the login form to the panel.
    RedirectToApp,
}

/// A decision plus the cookie side effect that accompanies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub decision: Decision,
    /// Drop the session cookie on the response.
    pub clear_cookie: bool,
}

impl Outcome {
    const fn allow() -> Self {
        Self { decision: Decision::Allow, clear_cookie: false }
    }
}

/// Reduce a classified route and verification result to an outcome.
///
/// `claims` must come from the verifier (`None` covers absent, malformed,
/// unsigned, and expired tokens alike); `had_token` reports whether the
/// request carried any cookie value at all.
#[must_use]
pub fn decide(class: RouteClass, had_token: bool, claims: Option<&Claims>) -> Outcome {
    match class {
        RouteClass::Protected => match claims {
            Some(claims) if claims.has_role(Role::Admin) => Outcome::allow(),
            Some(_) => Outcome { decision: Decision::RewriteToForbidden, clear_cookie: false },
            None => Outcome { decision: Decision::RedirectToLogin, clear_cookie: true },
        },
        RouteClass::Login => match claims {
            Some(claims) if claims.has_role(Role::Admin) => {
                Outcome { decision: Decision::RedirectToApp, clear_cookie: false }
            }
            // Non-admin sessions see the login form; they are not logged out.
            Some(_) => Outcome::allow(),
            // A cookie that failed verification is dead weight; drop it but
            // never block the way back to the form.
            None => Outcome { decision: Decision::Allow, clear_cookie: had_token },
        },
        RouteClass::Public => Outcome::allow(),
    }
}

// =============================================================================
// MIDDLEWARE
// =============================================================================

/// Axum middleware applying [`decide`] to every request.
pub async fn guard(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let class = RouteClass::classify(request.uri().path());
    if class == RouteClass::Public {
        return next.run(request).await;
    }

    let token = session::session_token(&jar);
    let claims = token.as_deref().and_then(|t| state.verifier.verify(t));
    let outcome = decide(class, token.is_some(), claims.as_ref());
    tracing::debug!(path = %request.uri().path(), decision = ?outcome.decision, "authorization decision");

    let response = match outcome.decision {
        Decision::Allow => next.run(request).await,
        Decision::RedirectToLogin => Redirect::temporary(LOGIN_PATH).into_response(),
        Decision::RedirectToApp => Redirect::temporary(ADMIN_PREFIX).into_response(),
        Decision::RewriteToForbidden => {
            *request.uri_mut() = Uri::from_static(FORBIDDEN_PATH);
            next.run(request).await
        }
    };

    if outcome.clear_cookie {
        let jar = CookieJar::new().add(session::clear_session_cookie(&state.config));
        (jar, response).into_response()
    } else {
        response
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
