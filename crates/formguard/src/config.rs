// File: src/config.rs
// Purpose: Configuration parsing from formguard.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use formguard_validation::PasswordPolicy;

/// Form validation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// Rules for the password and confirm-password fields
    #[serde(default)]
    pub password: PasswordPolicy,
}

impl FormConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        tracing::info!(
            path = %path.display(),
            min_password_length = config.password.min_length,
            "loaded form config"
        );
        Ok(config)
    }

    /// Load configuration from formguard.toml in the working directory
    pub fn load_default() -> Result<Self> {
        Self::load("formguard.toml")
    }

    /// Parse configuration from TOML text; blank text yields the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: FormConfig = toml::from_str(content)?;
        Ok(config)
    }
}
