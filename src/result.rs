//! Uniform result envelope and the typed backend error.
//!
//! Every write action returns an [`ActionResult`]: a genuine sum type whose
//! JSON shape is `{success: true, data, message?}` or `{success: false,
//! error, fieldErrors?}`. Callers branch on the success tag only; the shapes
//! of backend failures never leak past [`ActionResult::from_api_error`].

use std::collections::BTreeMap;

use axum::http::StatusCode;
use serde::Serialize;
use serde::ser::SerializeMap;

/// Fallback message for failures with no usable shape.
pub const GENERIC_ERROR: &str = "Terjadi kesalahan tak terduga.";

/// Machine-readable code the backend uses for credential failures.
pub const CODE_UNAUTHORIZED: &str = "UNAUTHORIZED";

// =============================================================================
// API ERROR
// =============================================================================

/// Typed failure reported by the upstream API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("[{status}] {message}")]
pub struct ApiError {
    pub message: String,
    pub status: StatusCode,
    /// Machine-readable code from the backend envelope, when present.
    pub code: Option<String>,
    /// Structured details; string-valued entries become field errors.
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    #[must_use]
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self { message: message.into(), status, code: None, details: None }
    }

    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

// =============================================================================
// ACTION RESULT
// =============================================================================

/// Discriminated success/failure envelope returned by every write action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult<T> {
    Success {
        data: T,
        message: Option<String>,
    },
    Failure {
        error: String,
        /// Keyed by form field name; `None` rather than an empty map.
        field_errors: Option<BTreeMap<String, String>>,
    },
}

impl<T> ActionResult<T> {
    #[must_use]
    pub fn success(data: T) -> Self {
        Self::Success { data, message: None }
    }

    #[must_use]
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self::Success { data, message: Some(message.into()) }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure { error: error.into(), field_errors: None }
    }

    #[must_use]
    pub fn failure_with_fields(
        error: impl Into<String>,
        field_errors: BTreeMap<String, String>,
    ) -> Self {
        let field_errors = if field_errors.is_empty() { None } else { Some(field_errors) };
        Self::Failure { error: error.into(), field_errors }
    }

    /// Normalize a typed backend failure: its message becomes the top-level
    /// error and string-valued `details` entries become field errors.
    #[must_use]
    pub fn from_api_error(err: &ApiError) -> Self {
        Self::Failure {
            error: err.message.clone(),
            field_errors: field_errors_from_details(err.details.as_ref()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

// Manual impl: the `success` discriminator is a constant per variant, which
// derived serde cannot express while keeping the enum exhaustive.
impl<T: Serialize> Serialize for ActionResult<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Success { data, message } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
                if let Some(message) = message {
                    map.serialize_entry("message", message)?;
                }
                map.end()
            }
            Self::Failure { error, field_errors } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                if let Some(field_errors) = field_errors {
                    map.serialize_entry("fieldErrors", field_errors)?;
                }
                map.end()
            }
        }
    }
}

// =============================================================================
// FIELD ERROR PROJECTION
// =============================================================================

/// Project string-valued entries of a structured `details` object into
/// field errors. Non-string values are dropped; an empty result is `None`.
#[must_use]
pub fn field_errors_from_details(
    details: Option<&serde_json::Value>,
) -> Option<BTreeMap<String, String>> {
    let object = details?.as_object()?;
    let map: BTreeMap<String, String> = object
        .iter()
        .filter_map(|(field, value)| value.as_str().map(|msg| (field.clone(), msg.to_owned())))
        .collect();
    (!map.is_empty()).then_some(map)
}

/// First message per field from a validation failure.
#[must_use]
pub fn field_errors_from_validation(errors: &validator::ValidationErrors) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for (field, errors) in errors.field_errors() {
        if let Some(first) = errors.first() {
            let message = first
                .message
                .as_ref()
                .map_or_else(|| first.code.to_string(), ToString::to_string);
            map.insert(field.to_string(), message);
        }
    }
    map
}

#[cfg(test)]
#[path = "result_test.rs"]
mod tests;
