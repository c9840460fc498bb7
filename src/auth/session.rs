//! Session cookie lifecycle.
//!
//! The cookie transports a bearer credential, so it is HttpOnly, `SameSite`
//! Lax, path `/`, and `Secure` outside explicitly non-TLS environments. All
//! reads and writes go through this module; handlers never touch the cookie
//! header directly.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use super::token::decode_unverified;
use crate::config::AppConfig;

/// Session cookie holding the backend-issued access token.
pub const ACCESS_TOKEN_COOKIE: &str = "ta_access";

pub(crate) fn now_unix() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

/// Build the session cookie for a freshly issued token.
///
/// The max-age is the token's remaining validity. Returns `None` when the
/// token is already expired; an expired credential is never written back to
/// the client. A token without a readable expiry becomes a browser-session
/// cookie.
#[must_use]
pub fn build_session_cookie(config: &AppConfig, token: &str) -> Option<Cookie<'static>> {
    build_session_cookie_at(config, token, now_unix())
}

fn build_session_cookie_at(config: &AppConfig, token: &str, now: i64) -> Option<Cookie<'static>> {
    let max_age = match decode_unverified(token).and_then(|claims| claims.exp) {
        Some(exp) => {
            let remaining = exp - now;
            if remaining <= 0 {
                return None;
            }
            Some(Duration::seconds(remaining))
        }
        None => None,
    };

    let mut cookie = base_cookie(config, token.to_owned());
    if let Some(max_age) = max_age {
        cookie.set_max_age(max_age);
    }
    Some(cookie)
}

/// Removal cookie for the session token.
///
/// Idempotent: issuing it for an absent cookie is a no-op on the client and
/// never an error here.
#[must_use]
pub fn clear_session_cookie(config: &AppConfig) -> Cookie<'static> {
    let mut cookie = base_cookie(config, String::new());
    cookie.set_max_age(Duration::ZERO);
    cookie
}

/// Raw token from the request cookie jar, if present and non-empty.
#[must_use]
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(ACCESS_TOKEN_COOKIE)
        .map(Cookie::value)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn base_cookie(config: &AppConfig, value: String) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .build()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
