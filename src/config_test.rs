use super::*;

// =============================================================================
// env_bool — uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on"].iter().enumerate() {
        let key = format!("__EDGE_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__EDGE_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_case_insensitive_and_trimmed() {
    let key = "__EDGE_EB_CI_7731__";
    unsafe { std::env::set_var(key, "  TRUE  ") };
    assert_eq!(env_bool(key), Some(true));
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_invalid_or_unset_returns_none() {
    let key = "__EDGE_EB_INVALID_482__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
    assert_eq!(env_bool("__EDGE_EB_SURELY_UNSET_91__"), None);
}

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_reads_valid_values() {
    let key = "__EDGE_EP_PORT_311__";
    unsafe { std::env::set_var(key, "8443") };
    assert_eq!(env_parse::<u16>(key, 3000), 8443);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_falls_back_on_garbage() {
    let key = "__EDGE_EP_BAD_312__";
    unsafe { std::env::set_var(key, "not-a-port") };
    assert_eq!(env_parse::<u16>(key, 3000), 3000);
    unsafe { std::env::remove_var(key) };
}

// =============================================================================
// split_origins
// =============================================================================

#[test]
fn split_origins_handles_commas_and_spaces() {
    let parsed = split_origins("https://api.example.com, wss://live.example.com https://cdn.example.com");
    assert_eq!(
        parsed,
        vec![
            "https://api.example.com".to_string(),
            "wss://live.example.com".to_string(),
            "https://cdn.example.com".to_string(),
        ]
    );
}

#[test]
fn split_origins_empty_input_is_empty() {
    assert!(split_origins("").is_empty());
    assert!(split_origins("  ,  , ").is_empty());
}

// =============================================================================
// from_env — the only test touching the real JWT_SECRET name; kept as a
// single sequential test so parallel tests never race on it.
// =============================================================================

#[test]
fn from_env_requires_secret_then_applies_defaults() {
    for var in ["JWT_SECRET", "API_BASE_URL", "PORT", "APP_ENV", "COOKIE_SECURE", "CONNECT_SRC_EXTRA", "WEBSITE_DIR"] {
        unsafe { std::env::remove_var(var) };
    }
    let err = AppConfig::from_env().expect_err("missing secret must fail");
    assert!(matches!(err, ConfigError::MissingSecret { .. }));

    unsafe { std::env::set_var("JWT_SECRET", "a-secret-for-config-tests") };
    let config = AppConfig::from_env().expect("secret present");
    assert_eq!(config.jwt_secret, "a-secret-for-config-tests");
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.port, DEFAULT_PORT);
    assert!(!config.production);
    assert_eq!(config.website_dir, std::path::PathBuf::from(DEFAULT_WEBSITE_DIR));
    unsafe { std::env::remove_var("JWT_SECRET") };
}
