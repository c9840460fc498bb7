//! Session token claims and the role model.

use serde::{Deserialize, Serialize};

/// Decoded payload of a session token.
///
/// Claims are only trustworthy when produced by
/// [`TokenVerifier::verify`](super::token::TokenVerifier::verify). Output of
/// [`decode_unverified`](super::token::decode_unverified) carries no trust
/// and must never feed an access decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier.
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub email: String,
    /// Raw role strings as signed by the issuer. Access checks go through
    /// [`Claims::has_role`] so unknown strings never grant anything.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiry, seconds since epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issued-at, seconds since epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Case-insensitive membership test against the validated role set.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|raw| Role::parse(raw) == Some(role))
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Whether the token is past its expiry at `now`. Absent `exp` never
    /// expires here; the verifier rejects such tokens outright.
    #[must_use]
    pub fn expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }
}

/// Validated role names. Free-form strings from a token are parsed into this
/// set before any comparison, so a typo can neither grant nor deny access
/// silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    /// Parse a role string, case-insensitively. Unknown roles map to `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "editor" => Some(Role::Editor),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimistic user snapshot derived from an *unverified* token.
///
/// Suitable for UI state only (showing a name, toggling a menu). Anything
/// that grants access must go through the verifier instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub roles: Vec<String>,
    #[serde(rename = "expiresAt", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            roles: claims.roles,
            expires_at: claims.exp,
        }
    }
}

/// Decode a token without verification and project it into a [`CurrentUser`].
#[must_use]
pub fn current_user(token: &str) -> Option<CurrentUser> {
    super::token::decode_unverified(token).map(CurrentUser::from)
}

#[cfg(test)]
#[path = "claims_test.rs"]
mod tests;
