use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::SanityError;
use crate::units::UnitParser;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SanityConfig {
    /// File extension both inputs must carry (without the dot).
    pub expected_extension: String,
    /// Repaired file path used when none is given on the command line.
    pub default_output: String,
    /// Field delimiter for reading and writing.
    pub delimiter: char,
    pub columns: ColumnConfig,
    pub units: UnitsConfig,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            expected_extension: "csv".into(),
            default_output: "bapu.csv".into(),
            delimiter: ',',
            columns: ColumnConfig::default(),
            units: UnitsConfig::default(),
        }
    }
}

impl SanityConfig {
    /// Parse and validate a TOML config. Missing keys take their defaults.
    pub fn from_toml(s: &str) -> Result<Self, SanityError> {
        let config: Self = toml::from_str(s).map_err(|e| SanityError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SanityError> {
        let ext = self.expected_extension.trim_start_matches('.');
        if ext.is_empty() {
            return Err(SanityError::Config("expected_extension must not be empty".into()));
        }
        if self.default_output.trim().is_empty() {
            return Err(SanityError::Config("default_output must not be empty".into()));
        }
        if !self.delimiter.is_ascii() || self.delimiter == '"' || self.delimiter == '\n' {
            return Err(SanityError::Config(format!(
                "delimiter must be a single ASCII character other than quote or newline, got {:?}",
                self.delimiter
            )));
        }
        self.columns.validate()?;
        UnitParser::from_config(&self.units)?;
        Ok(())
    }

    /// Extension without a leading dot, lowercased.
    pub fn extension(&self) -> String {
        self.expected_extension.trim_start_matches('.').to_ascii_lowercase()
    }

    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.delimiter as u8
    }
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnConfig {
    pub index: String,
    pub prediction: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            index: "index".into(),
            prediction: "prediction".into(),
        }
    }
}

impl ColumnConfig {
    fn validate(&self) -> Result<(), SanityError> {
        if self.index.is_empty() || self.prediction.is_empty() {
            return Err(SanityError::Config("column names must not be empty".into()));
        }
        if self.index == self.prediction {
            return Err(SanityError::Config(format!(
                "index and prediction columns must differ (both '{}')",
                self.index
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Unit vocabulary overrides for the prediction parser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnitsConfig {
    /// When true, `allowed` replaces the built-in unit set instead of extending it.
    pub replace_allowed: bool,
    pub allowed: Vec<String>,
    /// Alias -> canonical unit. Merged over the built-in aliases.
    pub aliases: BTreeMap<String, String>,
}
