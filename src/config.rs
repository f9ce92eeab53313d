//! # Configuration
//!
//! Optional YAML settings for the command-line front end:
//!
//! ```yaml
//! transpose: -2        # semitones, applied as single steps
//! numerals-key: Bb     # render chord lines as numerals in this key
//! format: json         # text | json | yaml
//! ```
//!
//! Every field is optional. Command-line flags take precedence.

use crate::error::LeadSheetError;
use crate::numerals::{render_numerals, Key};
use crate::parser::Document;
use crate::transpose::transpose_steps;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How a processed document is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rendered lines, one per line
    #[default]
    Text,
    /// The parsed document as JSON
    Json,
    /// The parsed document as YAML
    Yaml,
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub transpose: Option<i32>,
    pub numerals_key: Option<String>,
    pub format: Option<OutputFormat>,
}

/// Validated configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub transpose: i32,
    pub numerals_key: Option<Key>,
    pub format: OutputFormat,
}

impl Config {
    pub fn from_yaml_str(content: &str) -> Result<Self, LeadSheetError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| LeadSheetError::Config(e.to_string()))?;

        let numerals_key = raw
            .numerals_key
            .map(|key| {
                Key::parse(&key).map_err(|_| {
                    LeadSheetError::Config(format!("numerals-key is not a key: {}", key))
                })
            })
            .transpose()?;

        Ok(Self {
            transpose: raw.transpose.unwrap_or_default(),
            numerals_key,
            format: raw.format.unwrap_or_default(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, LeadSheetError> {
        let content = fs::read_to_string(path).map_err(|e| LeadSheetError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Transpose, then render numerals if a key is configured.
    pub fn apply(&self, doc: &mut Document) {
        transpose_steps(doc, self.transpose);
        if let Some(key) = self.numerals_key {
            render_numerals(doc, key);
        }
    }
}
