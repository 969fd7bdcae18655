//! Markup to property graph conversion.
//!
//!     The pipeline is parse -> walk -> resolve. The parser builds an element arena, the walker
//!     visits it in document order handing recognized tags to the node factory (nodes.rs) and
//!     text runs to the text processor (text.rs). Relations whose endpoint did not exist yet are
//!     queued on the context and resolved once the walk is done.
//!
//!     All state lives in a ConversionContext created per call, so a Converter can be shared
//!     and reused freely.

pub mod context;
pub mod helper;
pub mod nodes;
pub mod relations;
pub mod text;
pub mod walker;

use crate::document::parse_document;
use crate::error::ConvertError;
use crate::graph::{split_elements, GraphElement, GraphNode, GraphRelationship};
use context::ConversionContext;
use tracing::debug;

pub const DEFAULT_MAX_DEPTH: usize = 10_000;
pub const DEFAULT_IGNORE_ELEMENTS: &[&str] = &["damage", "unclear", "supplied", "hi", "g"];
pub const DEFAULT_IGNORE_SUBTREES: &[&str] = &["note", "annotation", "term", "translation"];
pub const DEFAULT_IGNORE_TREES: &[&str] = &["teiHeader", "facsimile"];

fn owned(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|tag| tag.to_string()).collect()
}

/// Traversal policy for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Tags that never produce a node but whose text and children are walked.
    pub ignore_elements: Vec<String>,
    /// Tags whose node is produced but whose children are not walked.
    pub ignore_subtrees: Vec<String>,
    /// Tags skipped entirely, text and children included. Their tail is kept.
    pub ignore_trees: Vec<String>,
    pub max_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            ignore_elements: owned(DEFAULT_IGNORE_ELEMENTS),
            ignore_subtrees: owned(DEFAULT_IGNORE_SUBTREES),
            ignore_trees: owned(DEFAULT_IGNORE_TREES),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Converts markup documents into graph elements.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Converter { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a document into nodes and relationships in emission order.
    pub fn convert(&self, source: &str) -> Result<Vec<GraphElement>, ConvertError> {
        let document = parse_document(source)?;
        let mut ctx = ConversionContext::new(&document, &self.options);
        walker::walk_document(&mut ctx);
        let elements = ctx.into_elements();

        debug!(
            source_elements = document.len(),
            graph_elements = elements.len(),
            "conversion finished"
        );
        Ok(elements)
    }

    /// Same as [`Converter::convert`], partitioned into nodes and relationships.
    pub fn convert_split(
        &self,
        source: &str,
    ) -> Result<(Vec<GraphNode>, Vec<GraphRelationship>), ConvertError> {
        Ok(split_elements(self.convert(source)?))
    }
}
