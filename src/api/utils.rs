//! API utility functions
//!
//! Contains helper functions used by API handlers for input validation and
//! boundary encoding of binary payloads.

use crate::error::AppError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Maximum accepted length for prompt-like inputs, in characters
pub const MAX_INPUT_LENGTH: usize = 10_000; // 10KB

/// Validate a prompt-like input string
///
/// # Arguments
/// * `field` - Field name used in the error message
/// * `value` - Value to validate
///
/// # Returns
/// * `Ok(())` - Input is valid
/// * `Err(AppError)` - Input is empty or too long
pub fn validate_input(field: &str, value: &str) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} cannot be empty", field)));
    }
    if trimmed.len() > MAX_INPUT_LENGTH {
        return Err(AppError::Validation(format!(
            "{} exceeds maximum length of {} characters",
            field, MAX_INPUT_LENGTH
        )));
    }
    Ok(())
}

/// Render binary payload bytes as a data URI for transport
///
/// Encoding happens at the HTTP boundary only; the engine and gateway deal
/// in raw bytes.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}
