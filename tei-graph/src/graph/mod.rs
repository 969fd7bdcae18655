//! Property graph model emitted by the converter.
//!
//! The output of a conversion is a flat, creation-ordered sequence of
//! [`GraphElement`]s, each either a node or a relationship. Callers that need
//! the two kinds apart can use [`split_elements`].

pub mod nodes;

pub use nodes::{
    is_node, is_relationship, split_elements, GraphElement, GraphNode, GraphRelationship, NodeId,
    Properties, Value,
};
