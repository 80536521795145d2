use crate::domain::user::User;
use crate::presentation::handlers::ApiError;
use actix_web::{error, web};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

pub const VALIDATION_ERROR_PREFIX: &str =
    "One or more of the required parameters was missing or invalid: ";

pub fn validation_message(field: &str) -> String {
    format!("{}\"{}\".", VALIDATION_ERROR_PREFIX, field)
}

/// Pulls `field` out of a JSON body. Absent, `null` and ill-typed values are all
/// reported as a validation error naming the field.
pub fn required_field<T: DeserializeOwned>(body: &Value, field: &str) -> Result<T, ApiError> {
    let value = body
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ApiError::Validation(field.to_string()))?;

    serde_json::from_value(value.clone()).map_err(|e| {
        debug!(field = field, error = %e, "Field failed to deserialize");
        ApiError::Validation(field.to_string())
    })
}

/// Reads `field` as a [`User`]. A user without an email is as malformed as a
/// missing one.
pub fn required_user(body: &Value, field: &str) -> Result<User, ApiError> {
    let user: User = required_field(body, field)?;
    if user.email.trim().is_empty() {
        debug!(field = field, "User has an empty email");
        return Err(ApiError::Validation(field.to_string()));
    }
    Ok(user)
}

/// Like [`required_field`] for optional form values; empty strings count as missing.
pub fn required_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::Validation(field.to_string()))
}

/// Ids are whole numbers within `i64`; fractional or out-of-range input is invalid.
pub fn parse_id(raw: &str, field: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::Validation(field.to_string()))
}

/// JSON extractor config whose failures use the validation envelope.
pub fn json_config(field: &'static str) -> web::JsonConfig {
    web::JsonConfig::default().error_handler(move |err, _req| {
        debug!(error = %err, "Rejected JSON payload");
        error::Error::from(ApiError::Validation(field.to_string()))
    })
}

pub fn form_config(field: &'static str) -> web::FormConfig {
    web::FormConfig::default().error_handler(move |err, _req| {
        debug!(error = %err, "Rejected form payload");
        error::Error::from(ApiError::Validation(field.to_string()))
    })
}
