//! Country-dependent postal code validation

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::result::{ValidationFailure, ValidationResult};

/// Countries with a known postal code format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountryCode {
    Usa,
    Canada,
    Uk,
}

impl CountryCode {
    pub const ALL: [CountryCode; 3] = [CountryCode::Usa, CountryCode::Canada, CountryCode::Uk];

    /// The value the country select submits
    pub fn as_str(&self) -> &'static str {
        match self {
            CountryCode::Usa => "usa",
            CountryCode::Canada => "canada",
            CountryCode::Uk => "uk",
        }
    }

    /// Message shown when a postal code does not fit this country's format
    pub fn mismatch_message(&self) -> &'static str {
        match self {
            CountryCode::Usa => "US postal codes must be 5 or 9 digits: e.g. 12345 or 12345-1234",
            CountryCode::Canada => "Canadian postal codes must follow the pattern A1A 1A1 format",
            CountryCode::Uk => {
                "UK postal codes must follow the pattern A1 1AA: e.g. W1A 1AA or M1 1AE"
            }
        }
    }

    pub fn pattern(&self) -> &'static PostalPattern {
        match self {
            CountryCode::Usa => &USA_PATTERN,
            CountryCode::Canada => &CANADA_PATTERN,
            CountryCode::Uk => &UK_PATTERN,
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountryCode {
    type Err = ValidationFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = trim_form_value(s);
        CountryCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| ValidationFailure::UnsupportedCountry(s.to_string()))
    }
}

/// Strips what `String.prototype.trim` strips: Unicode white space and
/// U+FEFF, but not U+0085.
fn trim_form_value(value: &str) -> &str {
    value.trim_matches(|c: char| (c.is_whitespace() && c != '\u{0085}') || c == '\u{FEFF}')
}

/// State of the country select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountrySelection<'a> {
    /// Nothing selected (empty or whitespace-only value)
    None,
    Supported(CountryCode),
    /// A value outside the supported set, trimmed
    Unsupported(&'a str),
}

impl<'a> CountrySelection<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let trimmed = trim_form_value(raw);
        if trimmed.is_empty() {
            return CountrySelection::None;
        }
        match trimmed.parse::<CountryCode>() {
            Ok(code) => CountrySelection::Supported(code),
            Err(_) => CountrySelection::Unsupported(trimmed),
        }
    }
}

/// A compiled postal code matcher paired with its error message
#[derive(Debug)]
pub struct PostalPattern {
    matcher: Regex,
    message: &'static str,
}

impl PostalPattern {
    /// Compiles with ASCII-only classes: `\d` is `[0-9]` and case folding
    /// never maps non-ASCII letters such as the Kelvin sign onto `K`.
    fn compile(pattern: &str, case_insensitive: bool, message: &'static str) -> Self {
        let matcher = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .unicode(false)
            .build()
            .unwrap();
        Self { matcher, message }
    }

    pub fn is_match(&self, postal_code: &str) -> bool {
        self.matcher.is_match(postal_code)
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn as_str(&self) -> &str {
        self.matcher.as_str()
    }
}

static USA_PATTERN: Lazy<PostalPattern> = Lazy::new(|| {
    PostalPattern::compile(
        r"^[0-9]{5}(-[0-9]{4})?$",
        false,
        CountryCode::Usa.mismatch_message(),
    )
});

static CANADA_PATTERN: Lazy<PostalPattern> = Lazy::new(|| {
    PostalPattern::compile(
        r"^[A-Z]\d[A-Z][ -]?\d[A-Z]\d$",
        true,
        CountryCode::Canada.mismatch_message(),
    )
});

// Outward code directly followed by inward code, no separator.
static UK_PATTERN: Lazy<PostalPattern> = Lazy::new(|| {
    PostalPattern::compile(
        r"^([A-Z]{1,2}\d{1,2}[A-Z]?)(\d[A-Z]{2})$",
        true,
        CountryCode::Uk.mismatch_message(),
    )
});

/// Checks a postal code against the selected country's format
///
/// Both inputs are trimmed. Rules, first match wins:
/// - no country and no postal code
/// - no country
/// - no postal code
/// - supported country: the postal code must match its pattern
/// - unsupported country: always rejected
pub fn check_postal_code(country: &str, postal_code: &str) -> Result<(), ValidationFailure> {
    let postal_code = trim_form_value(postal_code);

    match (CountrySelection::parse(country), postal_code.is_empty()) {
        (CountrySelection::None, true) => Err(ValidationFailure::CountryAndPostalCodeMissing),
        (CountrySelection::None, false) => Err(ValidationFailure::CountryMissing),
        (_, true) => Err(ValidationFailure::PostalCodeMissing),
        (CountrySelection::Supported(code), false) => {
            if code.pattern().is_match(postal_code) {
                Ok(())
            } else {
                Err(ValidationFailure::PostalCodeMismatch(code))
            }
        }
        (CountrySelection::Unsupported(raw), false) => {
            tracing::warn!(country = raw, "unsupported country for postal code validation");
            Err(ValidationFailure::UnsupportedCountry(raw.to_string()))
        }
    }
}

/// Validates a postal code and returns the verdict to render
pub fn validate_postal_code(country: &str, postal_code: &str) -> ValidationResult {
    let result = ValidationResult::from_result(check_postal_code(country, postal_code));
    tracing::debug!(field = "postal_code", valid = result.valid, "validated");
    result
}
