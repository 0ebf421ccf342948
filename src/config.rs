//! Configuration file schema for logicmap.
//!
//! A config file controls which files a batch run picks up and the limits
//! applied to each analysis. Every field has a default, so an empty file (or
//! no file at all) is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::parser::SourceLanguage;

/// Default config file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["logicmap.yaml", ".logicmap.yaml"];

/// Template written by `logicmap init`.
pub const DEFAULT_TEMPLATE: &str = include_str!("templates/default.yaml");

const DEFAULT_MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;
const DEFAULT_PARSE_TIMEOUT_MICROS: u64 = 10_000_000;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    /// File extensions (without dot) to analyze when walking directories
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Glob patterns for paths to exclude from analysis (e.g., "**/dist/**")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Files larger than this are reported as failed instead of analyzed
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    /// Parses running longer than this are abandoned
    #[serde(default = "default_parse_timeout_micros")]
    pub parse_timeout_micros: u64,
    /// Whether to descend into hidden directories (default: false)
    #[serde(default)]
    pub include_hidden: bool,
}

fn default_extensions() -> Vec<String> {
    SourceLanguage::ALL
        .iter()
        .flat_map(|lang| lang.file_extensions())
        .map(|ext| ext.to_string())
        .collect()
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

fn default_parse_timeout_micros() -> u64 {
    DEFAULT_PARSE_TIMEOUT_MICROS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            extensions: default_extensions(),
            excluded_paths: Vec::new(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            parse_timeout_micros: DEFAULT_PARSE_TIMEOUT_MICROS,
            include_hidden: false,
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a config from YAML text. Empty text yields the defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Look for a config file in `dir`.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    pub fn parse_timeout(&self) -> Duration {
        Duration::from_micros(self.parse_timeout_micros)
    }

    /// Whether a file extension is enabled for directory walks.
    pub fn handles_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Compile `excluded_paths` into a matcher.
    pub fn exclusion_set(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            builder.add(Glob::new(pattern)?);
        }
        Ok(builder.build()?)
    }
}

/// Validate a configuration.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.extensions.is_empty() {
        anyhow::bail!("extensions must not be empty");
    }
    for ext in &config.extensions {
        if SourceLanguage::from_extension(ext).is_none() {
            anyhow::bail!("extension {:?} has no analyzer", ext);
        }
    }
    for pattern in &config.excluded_paths {
        if let Err(e) = Glob::new(pattern) {
            anyhow::bail!("invalid excluded path pattern {:?}: {}", pattern, e);
        }
    }
    if config.max_file_bytes == 0 {
        anyhow::bail!("max_file_bytes must be greater than 0");
    }
    if config.parse_timeout_micros == 0 {
        anyhow::bail!("parse_timeout_micros must be greater than 0");
    }
    Ok(())
}
