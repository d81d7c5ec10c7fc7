// Formguard - sign-up form validation
// Live per-field checks and submit gating over the pure validators

pub mod config;
pub mod form;

pub use config::FormConfig;
pub use form::{Field, FieldUpdate, FormInput, FormReport, FormValidator};

// Re-export the field validators
pub use formguard_validation as validation;
pub use formguard_validation::{
    CountryCode, PasswordCheck, PasswordPolicy, Trigger, ValidationFailure, ValidationResult,
};
