//! Error types for conversion and output operations

use thiserror::Error;

/// Errors that can occur while converting a document or serializing its graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The input is not well-formed markup
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
    /// Output format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error while serializing the graph
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Operation or option not supported by a format
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Serialization(err.to_string())
    }
}
