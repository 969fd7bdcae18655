//! Shared configuration loader for the tei-graph toolchain.
//!
//! `defaults/tei.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`TeiConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use tei_graph::ConvertOptions;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/tei.default.toml");

/// Top-level configuration consumed by tei-graph applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TeiConfig {
    pub convert: ConvertConfig,
    pub output: OutputConfig,
}

/// Traversal knobs handed to the converter.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub max_depth: usize,
    pub ignore: IgnoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IgnoreConfig {
    pub elements: Vec<String>,
    pub subtrees: Vec<String>,
    pub trees: Vec<String>,
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        ConvertOptions {
            ignore_elements: config.ignore.elements.clone(),
            ignore_subtrees: config.ignore.subtrees.clone(),
            ignore_trees: config.ignore.trees.clone(),
            max_depth: config.max_depth,
        }
    }
}

impl From<ConvertConfig> for ConvertOptions {
    fn from(config: ConvertConfig) -> Self {
        ConvertOptions {
            ignore_elements: config.ignore.elements,
            ignore_subtrees: config.ignore.subtrees,
            ignore_trees: config.ignore.trees,
            max_depth: config.max_depth,
        }
    }
}

/// Output format selection and its JSON knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub pretty: bool,
    pub split: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TeiConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TeiConfig, ConfigError> {
    Loader::new().build()
}
