//! TOML configuration file support.
//!
//! Settings that are tedious to repeat on every invocation can live in a
//! config file passed with `--config`. Command-line flags take precedence.
//!
//! ```toml
//! # sweeplog.toml
//! [parser]
//! scaled_suffix = "_scaled"
//! raw_suffix = "_raw"
//!
//! [export]
//! transpose = false
//! alternate = true
//! delimiter = ";"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use sweeplog::sweep::{ScaledRawClassifier, SweepParser};

/// Root configuration structure for sweeplog.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Column-role settings.
    #[serde(default)]
    pub parser: ParserConfig,

    /// Settings of the export command.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Configuration of raster column roles.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    /// Title suffix of a scaled device column.
    pub scaled_suffix: Option<String>,

    /// Title suffix of the matching raw device column.
    pub raw_suffix: Option<String>,
}

/// Configuration for the export command.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Transpose rasters to (inner, outer).
    pub transpose: Option<bool>,

    /// Reverse odd passes of alternating rasters.
    pub alternate: Option<bool>,

    /// CSV field delimiter.
    pub delimiter: Option<char>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Parser using the configured column-role suffixes.
    pub fn parser(&self) -> SweepParser {
        SweepParser::with_classifier(ScaledRawClassifier::new(
            self.parser.scaled_suffix.as_deref().unwrap_or("_scaled"),
            self.parser.raw_suffix.as_deref().unwrap_or("_raw"),
        ))
    }

    /// CSV delimiter as a byte, `,` by default.
    pub fn delimiter(&self) -> Result<u8> {
        let delimiter = self.export.delimiter.unwrap_or(',');
        u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("Delimiter must be a single ASCII character, got {:?}", delimiter))
    }
}
