// File: src/form.rs
// Purpose: Live field validation and whole-form submit validation

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use formguard_validation::{
    validate_confirmation, validate_email, validate_postal_code, PasswordCheck, Trigger,
    ValidationResult,
};

use crate::config::FormConfig;

/// Current values of the sign-up form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    pub email: String,
    pub country: String,
    pub postal_code: String,
    pub password: String,
    pub confirm_password: String,
}

/// Form fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Email,
    Country,
    PostalCode,
    Password,
    ConfirmPassword,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Email,
        Field::Country,
        Field::PostalCode,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// Name used in form data and JSON
    pub fn name(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Country => "country",
            Field::PostalCode => "postalCode",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| anyhow!("Unknown form field: {}", s))
    }
}

/// Verdicts a UI should re-render after one input or change event
///
/// Fields absent from `results` keep whatever state they already show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdate {
    pub results: Vec<(Field, ValidationResult)>,
}

impl FieldUpdate {
    /// Verdict for a field, if this update touches it
    pub fn get(&self, field: Field) -> Option<&ValidationResult> {
        self.results
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, result)| result)
    }

    fn push_password_check(&mut self, check: PasswordCheck) {
        self.results.push((Field::Password, check.password));
        if let Some(confirm) = check.confirm {
            self.results.push((Field::ConfirmPassword, confirm));
        }
    }
}

/// Outcome of validating the whole form on submit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormReport {
    pub results: BTreeMap<Field, ValidationResult>,
}

impl FormReport {
    /// True when every validated field passed; submission must be blocked otherwise
    pub fn is_valid(&self) -> bool {
        self.results.values().all(ValidationResult::is_valid)
    }

    pub fn get(&self, field: Field) -> Option<&ValidationResult> {
        self.results.get(&field)
    }

    /// Get the error message for a specific field
    pub fn get_error(&self, field: Field) -> Option<&str> {
        self.results.get(&field).and_then(ValidationResult::error)
    }

    /// All failing fields with their messages, in display order
    pub fn errors(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.results
            .iter()
            .filter_map(|(field, result)| result.error().map(|message| (*field, message)))
    }
}

/// Validates sign-up form input against a [`FormConfig`]
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    config: FormConfig,
}

impl FormValidator {
    pub fn new(config: FormConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Live validation after `field` changed
    ///
    /// A country change re-validates the postal code, and either password
    /// field re-validates the pair.
    pub fn validate_field(&self, field: Field, input: &FormInput) -> FieldUpdate {
        let mut update = FieldUpdate::default();

        match field {
            Field::Email => {
                update.results.push((Field::Email, validate_email(&input.email)));
            }
            Field::Country | Field::PostalCode => {
                update.results.push((
                    Field::PostalCode,
                    validate_postal_code(&input.country, &input.postal_code),
                ));
            }
            Field::Password | Field::ConfirmPassword => {
                update.push_password_check(self.check_passwords(input, Trigger::Input));
            }
        }

        update
    }

    /// Validates every field for submission
    pub fn submit(&self, input: &FormInput) -> FormReport {
        let mut report = FormReport::default();

        report.results.insert(Field::Email, validate_email(&input.email));
        report.results.insert(
            Field::PostalCode,
            validate_postal_code(&input.country, &input.postal_code),
        );

        let check = self.check_passwords(input, Trigger::Submit);
        report.results.insert(Field::Password, check.password);
        if let Some(confirm) = check.confirm {
            report.results.insert(Field::ConfirmPassword, confirm);
        }

        let valid = report.is_valid();
        tracing::info!(valid, errors = report.errors().count(), "form submitted");
        report
    }

    fn check_passwords(&self, input: &FormInput, trigger: Trigger) -> PasswordCheck {
        validate_confirmation(
            &input.password,
            &input.confirm_password,
            &self.config.password,
            trigger,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
        }
        assert!("zip".parse::<Field>().is_err());
    }

    #[test]
    fn test_country_change_updates_postal_code() {
        let input = FormInput {
            country: "canada".to_string(),
            postal_code: "K1A 0B1".to_string(),
            ..Default::default()
        };

        let update = FormValidator::default().validate_field(Field::Country, &input);
        assert_eq!(update.results.len(), 1);
        assert_eq!(update.get(Field::PostalCode), Some(&ValidationResult::success()));
        assert_eq!(update.get(Field::Country), None);
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let report = FormValidator::default().submit(&FormInput::default());
        assert!(!report.is_valid());
        assert_eq!(
            report.errors().map(|(field, _)| field).collect::<Vec<_>>(),
            vec![Field::Email, Field::PostalCode, Field::Password]
        );
    }
}
