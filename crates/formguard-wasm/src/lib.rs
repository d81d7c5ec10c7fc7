//! Formguard WASM
//!
//! WebAssembly bindings for the sign-up form validators.
//! The browser calls these from its input, change and submit listeners and
//! renders the returned `{ valid, errorMessage }` objects next to each field.

use wasm_bindgen::prelude::*;
use serde::de::{self, IntoDeserializer};
use serde::{Deserialize, Serialize};
use formguard::{Field, FormConfig, FormInput, FormValidator, PasswordPolicy, Trigger};
use formguard_validation as validation;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Serialize maps as plain objects so results index by field name in JS
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

/// Read an optional password policy; `undefined` or `null` means the default
fn policy_from_js(policy: JsValue) -> Result<PasswordPolicy, JsValue> {
    if policy.is_undefined() || policy.is_null() {
        return Ok(PasswordPolicy::default());
    }
    serde_wasm_bindgen::from_value(policy)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse password policy: {}", e)))
}

/// Read a trigger name through `Trigger`'s serde names
fn parse_trigger(trigger: &str) -> Result<Trigger, String> {
    Trigger::deserialize(IntoDeserializer::<'_, de::value::Error>::into_deserializer(trigger))
        .map_err(|e| format!("Failed to parse trigger: {}", e))
}

/// Validate a postal code for the selected country
///
/// # Example (JavaScript)
/// ```javascript
/// const { valid, errorMessage } = validatePostalCode(country.value, postalCode.value);
/// ```
#[wasm_bindgen(js_name = validatePostalCode)]
pub fn validate_postal_code_js(country: &str, postal_code: &str) -> Result<JsValue, JsValue> {
    to_js(&validation::validate_postal_code(country, postal_code))
}

/// Quick postal code check, returning the message to show if invalid
#[wasm_bindgen(js_name = postalCodeError)]
pub fn postal_code_error_js(country: &str, postal_code: &str) -> Option<String> {
    validation::check_postal_code(country, postal_code)
        .err()
        .map(|failure| failure.to_string())
}

/// Validate a required email field
#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email_js(email: &str) -> Result<JsValue, JsValue> {
    to_js(&validation::validate_email(email))
}

/// Quick email format check
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    validation::is_valid_email(email)
}

/// Validate a password and its confirmation
///
/// `trigger` is `"input"` while typing or `"submit"` on submission.
/// `policy` may be omitted to use the default rules.
///
/// # Example (JavaScript)
/// ```javascript
/// const { password, confirm } = validatePassword(pw.value, confirmPw.value, "input");
/// // confirm is null when the confirm field should be left alone
/// ```
#[wasm_bindgen(js_name = validatePassword)]
pub fn validate_password_js(
    password: &str,
    confirm: &str,
    trigger: &str,
    policy: JsValue,
) -> Result<JsValue, JsValue> {
    let trigger = parse_trigger(trigger).map_err(|e| JsValue::from_str(&e))?;
    let policy = policy_from_js(policy)?;
    to_js(&validation::validate_confirmation(password, confirm, &policy, trigger))
}

/// Quick password check against the default policy
#[wasm_bindgen(js_name = passwordError)]
pub fn password_error_js(password: &str) -> Option<String> {
    PasswordPolicy::default()
        .check(password)
        .err()
        .map(|failure| failure.to_string())
}

/// Live validation after one field changed
///
/// # Arguments
/// * `field` - `"email"`, `"country"`, `"postalCode"`, `"password"` or `"confirmPassword"`
/// * `input` - the current form values
/// * `config` - optional `{ password: { min_length, ... } }` overrides
///
/// # Returns
/// Array of `[field, { valid, errorMessage }]` pairs to re-render
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field_js(field: &str, input: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let field = field
        .parse::<Field>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let input: FormInput = serde_wasm_bindgen::from_value(input)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse form input: {}", e)))?;
    let validator = validator_from_js(config)?;

    to_js(&validator.validate_field(field, &input).results)
}

/// Validate the whole form on submit
///
/// # Example (JavaScript)
/// ```javascript
/// form.addEventListener("submit", (event) => {
///     const report = validateForm(readForm(), undefined);
///     if (!report.valid) event.preventDefault();
/// });
/// ```
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form_js(input: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let input: FormInput = serde_wasm_bindgen::from_value(input)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse form input: {}", e)))?;
    let validator = validator_from_js(config)?;
    let report = validator.submit(&input);

    to_js(&FormOutcome {
        valid: report.is_valid(),
        results: &report.results,
    })
}

/// Submit verdict as handed to JavaScript
#[derive(Serialize)]
struct FormOutcome<'a> {
    valid: bool,
    results: &'a std::collections::BTreeMap<Field, validation::ValidationResult>,
}

fn validator_from_js(config: JsValue) -> Result<FormValidator, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(FormValidator::default());
    }
    let config: FormConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?;
    Ok(FormValidator::new(config))
}
