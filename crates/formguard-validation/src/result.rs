//! Validation verdicts and the failure taxonomy

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::postal::CountryCode;

/// Reason a field failed validation.
///
/// The `Display` output of each variant is the message shown next to the
/// field. Every failure is expected and user-correctable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("Please select a country and enter a postal code.")]
    CountryAndPostalCodeMissing,

    #[error("Please select a country to validate the postal code.")]
    CountryMissing,

    #[error("Please enter a postal code.")]
    PostalCodeMissing,

    /// Postal code does not match the selected country's format.
    #[error("{}", .0.pattern().message())]
    PostalCodeMismatch(CountryCode),

    /// Country value outside the supported set.
    #[error("Please enter a valid postal code.")]
    UnsupportedCountry(String),

    #[error("You need to enter an email address.")]
    EmailMissing,

    #[error("Entered value needs to be an email address.")]
    EmailMismatch,

    #[error("Please enter a password.")]
    PasswordMissing,

    #[error("Password must be at least {min} characters. You are currently using {actual} characters.")]
    PasswordTooShort { min: usize, actual: usize },

    #[error("Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character.")]
    PasswordPatternMismatch,

    #[error("Please confirm your password.")]
    ConfirmationMissing,

    #[error("Passwords do not match.")]
    PasswordsDiffer,
}

/// Verdict for a single field: the boolean plus the message to render.
///
/// `error_message` is empty when the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub error_message: String,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            error_message: String::new(),
        }
    }

    /// Create a failed validation result carrying the failure's message
    pub fn failure(failure: &ValidationFailure) -> Self {
        Self {
            valid: false,
            error_message: failure.to_string(),
        }
    }

    /// Convert from Result
    pub fn from_result(result: Result<(), ValidationFailure>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(failure) => Self::failure(&failure),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The message to show, if any
    pub fn error(&self) -> Option<&str> {
        if self.valid || self.error_message.is_empty() {
            None
        } else {
            Some(&self.error_message)
        }
    }
}

impl From<Result<(), ValidationFailure>> for ValidationResult {
    fn from(result: Result<(), ValidationFailure>) -> Self {
        Self::from_result(result)
    }
}
