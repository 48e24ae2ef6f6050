//! Request body decoding and required-field checks.

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub struct RequestValidator;

impl RequestValidator {
    /// Parse a raw body into `T`. The body must be a JSON object.
    pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Invalid JSON: {}", e)))?;
        if !value.is_object() {
            return Err(AppError::BadRequest("Request body must be a JSON object".into()));
        }
        serde_json::from_value(value).map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))
    }

    /// A required string: present, a string, and not blank. `label` names the field in
    /// the error, e.g. "Title is required".
    pub fn required(value: Option<String>, label: &str) -> Result<String, AppError> {
        value
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::Validation(format!("{} is required", label)))
    }
}

/// Assign `value` to `slot` when it is present and not blank. Used on update for
/// fields that may never be emptied.
pub fn set_non_empty(slot: &mut String, value: Option<String>) {
    if let Some(v) = value.filter(|s| !s.trim().is_empty()) {
        *slot = v;
    }
}

/// Assign `value` to `slot` when present.
pub fn set_present<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}
