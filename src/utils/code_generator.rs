//! Short code generation and validation.
//!
//! Generated codes are drawn uniformly from the 62-character alphabet
//! `[A-Za-z0-9]`. They are **not** cryptographically secure; uniqueness is
//! enforced by the store's unique constraint, not by randomness quality.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of auto-generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Number of candidates tried before allocation gives up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// Accepted shape for caller-supplied codes.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").unwrap());

/// Generates a random candidate code of [`GENERATED_CODE_LENGTH`] characters.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns `true` if `code` has the shape of a short code.
pub fn is_valid_code(code: &str) -> bool {
    CUSTOM_CODE_REGEX.is_match(code)
}

/// Validates a caller-supplied short code.
///
/// The code must be 6-8 ASCII letters or digits.
///
/// # Errors
///
/// Returns [`AppError::InvalidFormat`] otherwise.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !is_valid_code(code) {
        return Err(AppError::invalid_format(
            "Code must be 6-8 alphanumeric characters [A-Za-z0-9]",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
