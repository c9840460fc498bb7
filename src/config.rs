//! Gateway configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_WEBSITE_DIR: &str = "public";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} environment variable is not defined")]
    MissingSecret { var: String },
}

/// Typed gateway configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared HMAC secret used to verify session tokens.
    pub jwt_secret: String,
    /// Origin of the upstream auth/content backend, no trailing slash.
    pub api_base_url: String,
    pub port: u16,
    pub production: bool,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// Extra origins allowed in the CSP `connect-src` directive.
    pub connect_src_extra: Vec<String>,
    /// Directory the public marketing site is served from.
    pub website_dir: PathBuf,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `JWT_SECRET`: shared signing secret; startup fails without it
    ///
    /// Optional:
    /// - `API_BASE_URL`: backend origin, default `http://localhost:8080`
    /// - `PORT`: default 3000
    /// - `APP_ENV`: `production` enables production hardening
    /// - `COOKIE_SECURE`: overrides the `Secure` cookie attribute for
    ///   non-TLS test environments; defaults to the production switch
    /// - `CONNECT_SRC_EXTRA`: comma-separated third-party API origins
    /// - `WEBSITE_DIR`: static site root, default `public`
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| ConfigError::MissingSecret { var: "JWT_SECRET".into() })?;

        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let production = std::env::var("APP_ENV")
            .map(|v| v.trim().eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(Self {
            jwt_secret,
            api_base_url,
            port: env_parse("PORT", DEFAULT_PORT),
            production,
            cookie_secure: env_bool("COOKIE_SECURE").unwrap_or(production),
            connect_src_extra: split_origins(
                &std::env::var("CONNECT_SRC_EXTRA").unwrap_or_default(),
            ),
            website_dir: std::env::var("WEBSITE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_WEBSITE_DIR)),
        })
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Split a comma- or whitespace-separated origin list, dropping empties.
pub(crate) fn split_origins(raw: &str) -> Vec<String> {
    raw.split([',', ' '])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
