//! Plain-text graph summary
//!
//! Counts nodes by their most specific label and relationships by label, both sorted by
//! name. Used by `inspect` and handy for eyeballing a conversion.
//!
//! ```text
//! nodes: 4
//!   Character: 2
//!   Line: 1
//!   Word: 1
//! relationships: 3
//!   contains: 3
//! ```

use crate::error::ConvertError;
use crate::format::Format;
use crate::graph::GraphElement;
use std::collections::BTreeMap;

/// Element counts of a converted graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSummary {
    pub nodes: BTreeMap<String, usize>,
    pub relationships: BTreeMap<String, usize>,
}

impl GraphSummary {
    pub fn from_elements(elements: &[GraphElement]) -> Self {
        let mut summary = GraphSummary::default();
        for element in elements {
            let (counts, key) = match element {
                GraphElement::Node(node) => (&mut summary.nodes, node.kind()),
                GraphElement::Relationship(rel) => (&mut summary.relationships, rel.label.as_str()),
            };
            *counts.entry(key.to_string()).or_insert(0) += 1;
        }
        summary
    }

    pub fn node_count(&self) -> usize {
        self.nodes.values().sum()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.values().sum()
    }

    pub fn render(&self) -> String {
        let mut output = format!("nodes: {}\n", self.node_count());
        for (kind, count) in &self.nodes {
            output.push_str(&format!("  {kind}: {count}\n"));
        }
        output.push_str(&format!("relationships: {}\n", self.relationship_count()));
        for (label, count) in &self.relationships {
            output.push_str(&format!("  {label}: {count}\n"));
        }
        output
    }
}

/// Format implementation for the summary view
#[derive(Default)]
pub struct SummaryFormat;

impl Format for SummaryFormat {
    fn name(&self) -> &str {
        "summary"
    }

    fn description(&self) -> &str {
        "Node and relationship counts by label"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn serialize(&self, elements: &[GraphElement]) -> Result<String, ConvertError> {
        Ok(GraphSummary::from_elements(elements).render())
    }
}
