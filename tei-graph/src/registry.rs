//! Format registry for output format discovery and selection
//!
//! This module provides a centralized registry for all available output formats.
//! Formats can be registered and retrieved by name.

use crate::error::ConvertError;
use crate::format::Format;
use crate::graph::GraphElement;
use std::collections::HashMap;

/// Registry of output formats
///
/// # Examples
///
/// ```ignore
/// let mut registry = FormatRegistry::new();
/// registry.register(MyFormat);
///
/// let output = registry.serialize(&elements, "my-format")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, ConvertError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| ConvertError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Name and description of every format, sorted by name
    pub fn describe_formats(&self) -> Vec<(String, String)> {
        self.list_formats()
            .into_iter()
            .filter_map(|name| {
                let description = self.formats.get(&name)?.description().to_string();
                Some((name, description))
            })
            .collect()
    }

    /// Detect format from filename based on file extension
    ///
    /// ```ignore
    /// let registry = FormatRegistry::default();
    /// assert_eq!(registry.detect_format_from_filename("graph.json"), Some("json".to_string()));
    /// assert_eq!(registry.detect_format_from_filename("graph.cql"), Some("cypher".to_string()));
    /// assert_eq!(registry.detect_format_from_filename("graph.unknown"), None);
    /// ```
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension))
            .map(|format| format.name().to_string())
    }

    /// Serialize a graph using the specified format
    pub fn serialize(&self, elements: &[GraphElement], format: &str) -> Result<String, ConvertError> {
        self.get(format)?.serialize(elements)
    }

    /// Serialize a graph using the specified format and options
    pub fn serialize_with_options(
        &self,
        elements: &[GraphElement],
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        self.get(format)?.serialize_with_options(elements, options)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::json::JsonFormat);
        registry.register(crate::formats::cypher::CypherFormat);
        registry.register(crate::formats::summary::SummaryFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
