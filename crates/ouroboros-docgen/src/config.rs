//! Configuration for docgen
//!
//! Parses docgen.toml configuration files.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file looked up by [`DocgenConfig::from_directory`]
pub const CONFIG_FILE_NAME: &str = "docgen.toml";

/// Top-level docgen configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocgenConfig {
    #[serde(default)]
    pub docgen: DocgenSettings,
}

/// Main settings under [docgen]
#[derive(Debug, Clone, Deserialize)]
pub struct DocgenSettings {
    /// Directory names elided from the module hierarchy
    #[serde(default = "default_passthrough_modules")]
    pub passthrough_modules: Vec<String>,

    /// Maximum number of characters kept from a constant's initializer
    #[serde(default = "default_max_constant_text_length")]
    pub max_constant_text_length: usize,

    /// Nesting depth after which types are stringified instead of expanded
    #[serde(default = "default_max_type_depth")]
    pub max_type_depth: usize,

    /// Path fragments never treated as project sources
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Link built-in library globals (Array, Promise, ...) to their reference docs
    #[serde(default = "default_true")]
    pub builtin_links: bool,

    /// Link templates for symbols declared in dependencies
    #[serde(default)]
    pub externals: Vec<ExternalLinkConfig>,
}

/// Link template for one dependency
///
/// `url` may contain the placeholders `{name}`, `{kind}` and `{path}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExternalLinkConfig {
    /// Package name, e.g. `react` or `@babel/core`
    pub library: String,
    /// Link template
    pub url: String,
}

impl Default for DocgenSettings {
    fn default() -> Self {
        Self {
            passthrough_modules: default_passthrough_modules(),
            max_constant_text_length: default_max_constant_text_length(),
            max_type_depth: default_max_type_depth(),
            exclude: default_exclude(),
            builtin_links: true,
            externals: Vec::new(),
        }
    }
}

fn default_passthrough_modules() -> Vec<String> {
    vec!["src".to_string(), "lib".to_string()]
}

fn default_max_constant_text_length() -> usize {
    96
}

fn default_max_type_depth() -> usize {
    64
}

fn default_exclude() -> Vec<String> {
    vec!["node_modules".to_string(), ".git".to_string()]
}

fn default_true() -> bool {
    true
}

impl DocgenConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parse configuration from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Find and load configuration from a directory (looks for docgen.toml)
    pub fn from_directory(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::from_file(&config_path)
        } else if let Some(parent) = dir.parent() {
            Self::from_directory(parent)
        } else {
            Ok(Self::default())
        }
    }

    /// Replace the passthrough directory names
    pub fn with_passthrough_modules<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.docgen.passthrough_modules = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the maximum constant initializer length
    pub fn with_max_constant_text_length(mut self, length: usize) -> Self {
        self.docgen.max_constant_text_length = length;
        self
    }

    /// Set the maximum type nesting depth
    pub fn with_max_type_depth(mut self, depth: usize) -> Self {
        self.docgen.max_type_depth = depth;
        self
    }

    /// Check if a path should be excluded from project sources
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.docgen
            .exclude
            .iter()
            .any(|pattern| path_str.contains(pattern.as_str()))
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(toml::de::Error),
}
