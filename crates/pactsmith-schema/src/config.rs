//! Synthesis defaults.
//!
//! Values the synthesizer uses when a field carries no annotation. Every
//! field is optional in the TOML form:
//!
//! ```toml
//! string_example = "string"
//! bool_example = true
//! integer_example = 1
//! float_example = 1.1
//! min_items = 1
//! ```

use crate::tag::DEFAULT_MIN_ITEMS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisDefaults {
    #[serde(alias = "stringExample")]
    pub string_example: String,

    #[serde(alias = "boolExample")]
    pub bool_example: bool,

    #[serde(alias = "integerExample")]
    pub integer_example: i64,

    #[serde(alias = "floatExample")]
    pub float_example: f64,

    /// Minimum sequence length for sequence fields without `min=`.
    #[serde(alias = "minItems")]
    pub min_items: usize,
}

impl Default for SynthesisDefaults {
    fn default() -> Self {
        Self {
            string_example: "string".to_string(),
            bool_example: true,
            integer_example: 1,
            float_example: 1.1,
            min_items: DEFAULT_MIN_ITEMS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for `{field}`: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl SynthesisDefaults {
    /// Load defaults from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse_toml(&text, &path.display().to_string())
    }

    /// Parse defaults from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse_toml(text, "<in-memory>")
    }

    fn parse_toml(text: &str, path: &str) -> Result<Self, ConfigError> {
        let defaults: Self = toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: path.to_string(),
            source,
        })?;
        defaults.validate()?;
        Ok(defaults)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.string_example.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "string_example",
                message: "must be non-empty".to_string(),
            });
        }
        if !self.float_example.is_finite() {
            return Err(ConfigError::Invalid {
                field: "float_example",
                message: format!("must be finite, got {}", self.float_example),
            });
        }
        Ok(())
    }
}
