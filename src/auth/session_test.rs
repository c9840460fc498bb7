use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::*;
use crate::state::test_helpers::{TEST_SECRET, mint_token, test_config};

const NOW: i64 = 1_700_000_000;

// =============================================================================
// build_session_cookie
// =============================================================================

#[test]
fn cookie_max_age_equals_remaining_validity() {
    let config = test_config();
    let token = mint_token(TEST_SECRET, "user-1", &["admin"], Some(NOW + 3600));

    let cookie = build_session_cookie_at(&config, &token, NOW).expect("future expiry");
    assert_eq!(cookie.name(), ACCESS_TOKEN_COOKIE);
    assert_eq!(cookie.value(), token);
    assert_eq!(cookie.max_age(), Some(Duration::seconds(3600)));
}

#[test]
fn expired_token_writes_no_cookie() {
    let config = test_config();
    let token = mint_token(TEST_SECRET, "user-1", &["admin"], Some(NOW - 1));
    assert!(build_session_cookie_at(&config, &token, NOW).is_none());

    // Expiring exactly now counts as expired.
    let token = mint_token(TEST_SECRET, "user-1", &["admin"], Some(NOW));
    assert!(build_session_cookie_at(&config, &token, NOW).is_none());
}

#[test]
fn token_without_expiry_becomes_session_cookie() {
    let config = test_config();
    let token = mint_token(TEST_SECRET, "user-1", &["admin"], None);

    let cookie = build_session_cookie_at(&config, &token, NOW).expect("session cookie");
    assert_eq!(cookie.max_age(), None);
}

#[test]
fn undecodable_token_becomes_session_cookie() {
    // The store does not judge token validity; that is the verifier's job.
    let config = test_config();
    let cookie = build_session_cookie_at(&config, "opaque-blob", NOW).expect("stored verbatim");
    assert_eq!(cookie.value(), "opaque-blob");
    assert_eq!(cookie.max_age(), None);
}

#[test]
fn cookie_attributes_are_hardened() {
    let config = test_config();
    let token = mint_token(TEST_SECRET, "user-1", &["admin"], Some(NOW + 60));

    let cookie = build_session_cookie_at(&config, &token, NOW).expect("cookie");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.secure(), Some(false));

    let mut secure_config = test_config();
    secure_config.cookie_secure = true;
    let cookie = build_session_cookie_at(&secure_config, &token, NOW).expect("cookie");
    assert_eq!(cookie.secure(), Some(true));
}

// =============================================================================
// clear_session_cookie
// =============================================================================

#[test]
fn clear_cookie_expires_immediately() {
    let config = test_config();
    let cookie = clear_session_cookie(&config);
    assert_eq!(cookie.name(), ACCESS_TOKEN_COOKIE);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
}

#[test]
fn clear_cookie_is_idempotent() {
    let config = test_config();
    let jar = CookieJar::new()
        .add(clear_session_cookie(&config))
        .add(clear_session_cookie(&config));
    // Same end state, no error on the second removal.
    let cookie = jar.get(ACCESS_TOKEN_COOKIE).expect("removal cookie present");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
}

// =============================================================================
// session_token
// =============================================================================

#[test]
fn set_then_get_round_trips_within_one_cycle() {
    let config = test_config();
    let token = mint_token(TEST_SECRET, "user-1", &["admin"], Some(NOW + 60));
    let cookie = build_session_cookie_at(&config, &token, NOW).expect("cookie");

    let jar = CookieJar::new().add(cookie);
    assert_eq!(session_token(&jar), Some(token));
}

#[test]
fn missing_or_empty_cookie_reads_as_none() {
    let jar = CookieJar::new();
    assert_eq!(session_token(&jar), None);

    let jar = jar.add(Cookie::new(ACCESS_TOKEN_COOKIE, ""));
    assert_eq!(session_token(&jar), None);
}
