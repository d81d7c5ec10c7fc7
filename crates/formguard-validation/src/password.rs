//! Password and confirm-password validation

use serde::{Deserialize, Serialize};

use crate::result::{ValidationFailure, ValidationResult};

/// Constraints a password must satisfy
///
/// Stands in for the `minlength` and `pattern` attributes of a password
/// input. The default requires 8+ characters with uppercase, lowercase,
/// digit, and special character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

impl PasswordPolicy {
    /// True when every required character class is present
    fn satisfies_pattern(&self, password: &str) -> bool {
        let has_uppercase = password.chars().any(|c| c.is_uppercase());
        let has_lowercase = password.chars().any(|c| c.is_lowercase());
        let has_digit = password.chars().any(|c| c.is_numeric());
        let has_special = password
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

        (!self.require_uppercase || has_uppercase)
            && (!self.require_lowercase || has_lowercase)
            && (!self.require_digit || has_digit)
            && (!self.require_special || has_special)
    }

    /// Checks a password against this policy
    ///
    /// Order: missing, too short, pattern mismatch. Length is counted in
    /// UTF-16 code units, as a browser counts `minlength`.
    pub fn check(&self, password: &str) -> Result<(), ValidationFailure> {
        if password.is_empty() {
            return Err(ValidationFailure::PasswordMissing);
        }

        let length = password.encode_utf16().count();
        if length < self.min_length {
            return Err(ValidationFailure::PasswordTooShort {
                min: self.min_length,
                actual: length,
            });
        }

        if !self.satisfies_pattern(password) {
            return Err(ValidationFailure::PasswordPatternMismatch);
        }

        Ok(())
    }
}

/// What caused a validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Live validation while the user types
    Input,
    /// Form submission
    Submit,
}

/// Verdicts for the password pair
///
/// `confirm` is `None` when the confirm field should be left as it is: the
/// password itself is invalid, or the confirmation is still incomplete
/// during live validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordCheck {
    pub password: ValidationResult,
    pub confirm: Option<ValidationResult>,
}

impl PasswordCheck {
    pub fn is_valid(&self) -> bool {
        self.password.valid && self.confirm.as_ref().is_some_and(|c| c.valid)
    }
}

/// Validates a password field and returns the verdict to render
pub fn validate_password(password: &str, policy: &PasswordPolicy) -> ValidationResult {
    let result = ValidationResult::from_result(policy.check(password));
    tracing::debug!(field = "password", valid = result.valid, "validated");
    result
}

/// Validates a password together with its confirmation
pub fn validate_confirmation(
    password: &str,
    confirm: &str,
    policy: &PasswordPolicy,
    trigger: Trigger,
) -> PasswordCheck {
    let password_result = validate_password(password, policy);
    if !password_result.valid {
        return PasswordCheck {
            password: password_result,
            confirm: None,
        };
    }

    let confirm_result = match policy.check(confirm) {
        Ok(()) if password != confirm => {
            Some(ValidationResult::failure(&ValidationFailure::PasswordsDiffer))
        }
        Ok(()) => Some(ValidationResult::success()),
        Err(_) => match trigger {
            Trigger::Input => None,
            Trigger::Submit => Some(ValidationResult::failure(
                &ValidationFailure::ConfirmationMissing,
            )),
        },
    };

    if let Some(result) = &confirm_result {
        tracing::debug!(field = "confirm_password", valid = result.valid, "validated");
    }

    PasswordCheck {
        password: password_result,
        confirm: confirm_result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = PasswordPolicy::default();
        assert!(policy.check("Password123!").is_ok());
        assert!(policy.check("Secure@Pass1").is_ok());
        assert_eq!(policy.check(""), Err(ValidationFailure::PasswordMissing));
        assert_eq!(
            policy.check("Ab1!"),
            Err(ValidationFailure::PasswordTooShort { min: 8, actual: 4 })
        );
        assert_eq!(policy.check("NoSpecial123"), Err(ValidationFailure::PasswordPatternMismatch));
        assert_eq!(policy.check("nouppercas!1"), Err(ValidationFailure::PasswordPatternMismatch));
        assert_eq!(policy.check("NOLOWERCASE!1"), Err(ValidationFailure::PasswordPatternMismatch));
        assert_eq!(policy.check("NoDigits!Aa"), Err(ValidationFailure::PasswordPatternMismatch));
    }

    #[test]
    fn test_whitespace_is_not_special() {
        let policy = PasswordPolicy::default();
        assert_eq!(policy.check("Pass word1"), Err(ValidationFailure::PasswordPatternMismatch));
    }

    #[test]
    fn test_length_counts_utf16_units() {
        let policy = PasswordPolicy::default();
        // 7 characters, 10 bytes, 7 UTF-16 units
        assert_eq!(
            policy.check("Äb1!ßçd"),
            Err(ValidationFailure::PasswordTooShort { min: 8, actual: 7 })
        );
        // Each emoji is a surrogate pair: 6 characters, 8 units
        assert!(policy.check("Ab1!😀😀").is_ok());
        assert_eq!(
            policy.check("Ab1!😀"),
            Err(ValidationFailure::PasswordTooShort { min: 8, actual: 6 })
        );
    }

    #[test]
    fn test_relaxed_policy() {
        let policy = PasswordPolicy {
            min_length: 6,
            require_uppercase: false,
            require_lowercase: true,
            require_digit: false,
            require_special: false,
        };
        assert!(policy.check("simple").is_ok());
        assert!(policy.check("short").is_err());
    }

    #[test]
    fn test_too_short_message() {
        let result = validate_password("Ab1!", &PasswordPolicy::default());
        assert_eq!(
            result.error_message,
            "Password must be at least 8 characters. You are currently using 4 characters."
        );
    }

    #[test]
    fn test_invalid_password_leaves_confirm_untouched() {
        let check = validate_confirmation("weak", "weak", &PasswordPolicy::default(), Trigger::Submit);
        assert!(!check.password.valid);
        assert_eq!(check.confirm, None);
        assert!(!check.is_valid());
    }

    #[test]
    fn test_matching_confirmation() {
        let check = validate_confirmation(
            "Password123!",
            "Password123!",
            &PasswordPolicy::default(),
            Trigger::Input,
        );
        assert!(check.is_valid());
        assert_eq!(check.confirm, Some(ValidationResult::success()));
    }

    #[test]
    fn test_mismatched_confirmation() {
        let check = validate_confirmation(
            "Password123!",
            "Password123?",
            &PasswordPolicy::default(),
            Trigger::Input,
        );
        assert!(check.password.valid);
        assert_eq!(
            check.confirm.map(|c| c.error_message),
            Some("Passwords do not match.".to_string())
        );
    }

    #[test]
    fn test_untouched_confirm_serializes_as_null() {
        let check = validate_confirmation("weak", "", &PasswordPolicy::default(), Trigger::Input);
        let json = serde_json::to_value(&check).unwrap();
        assert_eq!(json["confirm"], serde_json::Value::Null);
        assert_eq!(json["password"]["valid"], serde_json::json!(false));
    }

    #[test]
    fn test_incomplete_confirmation_depends_on_trigger() {
        let policy = PasswordPolicy::default();

        let live = validate_confirmation("Password123!", "Pass", &policy, Trigger::Input);
        assert_eq!(live.confirm, None);
        assert!(!live.is_valid());

        let submitted = validate_confirmation("Password123!", "", &policy, Trigger::Submit);
        assert_eq!(
            submitted.confirm.map(|c| c.error_message),
            Some("Please confirm your password.".to_string())
        );
    }
}
