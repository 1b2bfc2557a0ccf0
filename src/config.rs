//! Optional TOML configuration.
//!
//! Every key has a default, so an absent file and an empty file behave the
//! same. Command-line flags override what is loaded here.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::document::DocumentFormat;
use crate::report::LineTerminator;

/// Base name of the report file when none is given.
pub const DEFAULT_REPORT_NAME: &str = "hashtags";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    #[serde(default)]
    pub format: DocumentFormat,
    /// File-name suffix to match; falls back to the format's extension.
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Sort discovered paths instead of keeping filesystem walk order.
    #[serde(default)]
    pub sort: bool,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
}

impl ScanConfig {
    pub fn extension(&self) -> &str {
        self.extension
            .as_deref()
            .unwrap_or_else(|| self.format.default_extension())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_filename")]
    pub filename: String,
    #[serde(default)]
    pub line_terminator: LineTerminator,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            filename: default_filename(),
            line_terminator: LineTerminator::default(),
        }
    }
}

fn default_filename() -> String {
    DEFAULT_REPORT_NAME.to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &Config) -> Result<()> {
    if config.scan.extension().is_empty() {
        anyhow::bail!("scan.extension must not be empty");
    }

    for pattern in &config.scan.exclude_globs {
        globset::Glob::new(pattern)
            .with_context(|| format!("Invalid scan.exclude_globs pattern: '{}'", pattern))?;
    }

    validate_filename(&config.output.filename)
}

/// A report base name must be a bare file name.
pub fn validate_filename(name: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("output.filename must not be empty");
    }
    if name.contains('/') || name.contains('\\') {
        anyhow::bail!(
            "output.filename must not contain a path separator: '{}'",
            name
        );
    }
    Ok(())
}
