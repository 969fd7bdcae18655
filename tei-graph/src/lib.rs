//! Philological markup to property graph conversion
//!
//!     This crate turns a TEI-style edition document (transliteration, vocalisation, words,
//!     signs, alternatives, notes) into a labeled property graph: a flat, creation-ordered list
//!     of nodes and relationships that shares one id counter.
//!
//!     This is a pure lib, that is, it powers tei-cli but is shell agnostic: no code here
//!     supposes a shell environment, be it std print, env vars etc. Diagnostics go through
//!     `tracing`; installing a subscriber is up to the caller.
//!
//! Architecture
//!
//!     .
//!     ├── error.rs                # ConvertError
//!     ├── document                # roxmltree -> element arena (ids, parents, text, tails)
//!     ├── graph                   # GraphNode, GraphRelationship, GraphElement, Value
//!     ├── convert
//!     │   ├── mod.rs              # ConvertOptions, Converter
//!     │   ├── context.rs          # per-call state: ids, indexes, deferred worklist
//!     │   ├── helper.rs           # ancestor search, reference resolution, text, serialization
//!     │   ├── walker.rs           # tag dispatch table and document-order traversal
//!     │   ├── nodes.rs            # one constructor per node type
//!     │   ├── relations.rs        # containment rules and relationship constructors
//!     │   └── text.rs             # per-character Sign / Character segmentation
//!     ├── format.rs               # Format trait for graph output
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     └── formats                 # json, cypher, summary
//!
//! Core Algorithm
//!
//!     The walker visits the document depth first, root included. A recognized tag becomes a
//!     node whose type comes from a static table, and the node is attached to its nearest
//!     structural ancestor that has a node. Text is segmented per character: inside a word into
//!     Character nodes, inside the graphical layer into Sign nodes. Whitespace never becomes a
//!     node, it is folded onto the previous atom.
//!
//!     Relations towards elements that appear later in the document (a note targeting a word
//!     further down, a phrase listing its words) are queued and resolved after the walk.
//!
//!     The `contains` relation is filtered through a fixed table of allowed container/member
//!     pairs and numbered with a per-container `pos`; see ./convert/relations.rs.
//!
//! Usage
//!
//!     let elements = tei_graph::convert(source)?;
//!     let json = FormatRegistry::default().serialize(&elements, "json")?;

pub mod convert;
pub mod document;
pub mod error;
pub mod format;
pub mod formats;
pub mod graph;
pub mod registry;

pub use convert::{ConvertOptions, Converter};
pub use error::ConvertError;
pub use format::Format;
pub use graph::{
    is_node, is_relationship, split_elements, GraphElement, GraphNode, GraphRelationship, NodeId,
    Properties, Value,
};
pub use registry::FormatRegistry;

/// Convert a document with the default options.
pub fn convert(source: &str) -> Result<Vec<GraphElement>, ConvertError> {
    Converter::default().convert(source)
}

/// Convert a document with the default options, split into nodes and relationships.
pub fn convert_split(
    source: &str,
) -> Result<(Vec<GraphNode>, Vec<GraphRelationship>), ConvertError> {
    Converter::default().convert_split(source)
}
