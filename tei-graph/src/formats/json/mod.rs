//! JSON graph output
//!
//! The default layout is the element sequence itself, in creation order:
//!
//! ```text
//! [
//!   {"type": "node", "id": 0, "labels": ["Thing", "TextUnit", "VisualUnit", "Zone", "Line"], "properties": {"n": "auto-1"}},
//!   {"type": "relationship", "id": 2, "start": 0, "end": 1, "label": "contains", "properties": {"pos": 0}}
//! ]
//! ```
//!
//! With `split=true` nodes and relationships are written as two arrays of an object
//! (`{"nodes": [...], "relationships": [...]}`), keeping their relative order.
//!
//! Extra parameters:
//!     pretty  Indent the output (default true)
//!     split   Partition into nodes and relationships (default false)

use crate::error::ConvertError;
use crate::format::{bool_option, Format};
use crate::graph::{GraphElement, GraphNode, GraphRelationship};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize)]
struct SplitGraph<'a> {
    nodes: Vec<&'a GraphNode>,
    relationships: Vec<&'a GraphRelationship>,
}

impl<'a> SplitGraph<'a> {
    fn new(elements: &'a [GraphElement]) -> Self {
        SplitGraph {
            nodes: elements.iter().filter_map(GraphElement::as_node).collect(),
            relationships: elements
                .iter()
                .filter_map(GraphElement::as_relationship)
                .collect(),
        }
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, ConvertError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Serialize a graph to JSON.
pub fn serialize_graph(
    elements: &[GraphElement],
    pretty: bool,
    split: bool,
) -> Result<String, ConvertError> {
    if split {
        to_json(&SplitGraph::new(elements), pretty)
    } else {
        to_json(&elements, pretty)
    }
}

/// Format implementation for JSON graph output
#[derive(Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Nodes and relationships as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn serialize(&self, elements: &[GraphElement]) -> Result<String, ConvertError> {
        serialize_graph(elements, true, false)
    }

    fn serialize_with_options(
        &self,
        elements: &[GraphElement],
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        if let Some(key) = options.keys().find(|k| !matches!(k.as_str(), "pretty" | "split")) {
            return Err(ConvertError::NotSupported(format!(
                "Format 'json' has no parameter '{key}'"
            )));
        }
        let pretty = bool_option(options, "pretty", true)?;
        let split = bool_option(options, "split", false)?;
        serialize_graph(elements, pretty, split)
    }
}
