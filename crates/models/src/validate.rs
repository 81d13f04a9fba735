//! Required-field checks applied before anything reaches a store.

use crate::errors::ModelError;

/// Return the trimmed value of a required text field.
pub fn required(field: &str, value: Option<String>) -> Result<String, ModelError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ModelError::Validation(format!("{field} is required"))),
    }
}

/// Optional field that, when supplied, must not be blank.
pub fn present_non_empty(field: &str, value: Option<String>) -> Result<Option<String>, ModelError> {
    match value {
        None => Ok(None),
        Some(v) => required(field, Some(v)).map(Some),
    }
}
