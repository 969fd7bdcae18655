//! Output format trait definition
//!
//! This module defines the Format trait that all graph output formats implement.
//! A format turns the element sequence produced by a conversion into text.

use crate::error::ConvertError;
use crate::graph::GraphElement;
use std::collections::HashMap;

/// Trait for graph output formats
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn serialize(&self, elements: &[GraphElement]) -> Result<String, ConvertError> {
///         Ok(format!("{} elements", elements.len()))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "json", "cypher")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    /// Used for automatic format detection from output filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Serialize the converted graph
    fn serialize(&self, elements: &[GraphElement]) -> Result<String, ConvertError>;

    /// Serialize the converted graph using extra parameters.
    ///
    /// The default implementation accepts no parameters and delegates to
    /// [`Format::serialize`].
    fn serialize_with_options(
        &self,
        elements: &[GraphElement],
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        if options.is_empty() {
            self.serialize(elements)
        } else {
            Err(ConvertError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

/// Read a boolean extra parameter. Missing keys yield `default`.
pub fn bool_option(
    options: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool, ConvertError> {
    match options.get(key).map(|v| v.to_lowercase()) {
        None => Ok(default),
        Some(value) => match value.as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(ConvertError::NotSupported(format!(
                "Invalid value '{value}' for '{key}', expected true or false"
            ))),
        },
    }
}
