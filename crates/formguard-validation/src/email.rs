//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

use crate::result::{ValidationFailure, ValidationResult};

// "Valid email address" as defined for <input type="email">
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

/// Validates email format
///
/// Label rules follow the browser's email input: single-label domains such
/// as `user@localhost` are accepted.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Checks a required email field
///
/// Surrounding ASCII whitespace is stripped first, the way the browser
/// sanitizes an email input's value. Other Unicode spaces are kept.
pub fn check_email(email: &str) -> Result<(), ValidationFailure> {
    let email = email.trim_matches(|c: char| c.is_ascii_whitespace());

    if email.is_empty() {
        return Err(ValidationFailure::EmailMissing);
    }

    if !is_valid_email(email) {
        return Err(ValidationFailure::EmailMismatch);
    }

    Ok(())
}

/// Validates a required email field and returns the verdict to render
pub fn validate_email(email: &str) -> ValidationResult {
    let result = ValidationResult::from_result(check_email(email));
    tracing::debug!(field = "email", valid = result.valid, "validated");
    result
}
