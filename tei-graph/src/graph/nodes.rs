//! Core data structures for the emitted property graph.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier shared by nodes and relationships, allocated from one counter.
pub type NodeId = u64;

/// Property map attached to nodes and relationships.
pub type Properties = BTreeMap<String, Value>;

/// A scalar property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(number) => Some(*number),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Integer(number)
    }
}

impl From<usize> for Value {
    fn from(number: usize) -> Self {
        Value::Integer(number as i64)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<char> for Value {
    fn from(ch: char) -> Self {
        Value::Text(ch.to_string())
    }
}

/// A labeled node. Labels run from the generic root label down to the
/// specific type, e.g. `Thing, TextUnit, VisualUnit, Zone, Line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub labels: Vec<String>,
    pub properties: Properties,
}

impl GraphNode {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// The most specific label of the taxonomy path.
    pub fn kind(&self) -> &str {
        self.labels.last().map(String::as_str).unwrap_or("")
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// A directed, labeled relationship between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRelationship {
    pub id: NodeId,
    pub start: NodeId,
    pub end: NodeId,
    pub label: String,
    pub properties: Properties,
}

impl GraphRelationship {
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// One entry of the converter output, in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GraphElement {
    Node(GraphNode),
    Relationship(GraphRelationship),
}

impl GraphElement {
    pub fn id(&self) -> NodeId {
        match self {
            GraphElement::Node(node) => node.id,
            GraphElement::Relationship(rel) => rel.id,
        }
    }

    pub fn as_node(&self) -> Option<&GraphNode> {
        match self {
            GraphElement::Node(node) => Some(node),
            GraphElement::Relationship(_) => None,
        }
    }

    pub fn as_relationship(&self) -> Option<&GraphRelationship> {
        match self {
            GraphElement::Node(_) => None,
            GraphElement::Relationship(rel) => Some(rel),
        }
    }
}

pub fn is_node(element: &GraphElement) -> bool {
    matches!(element, GraphElement::Node(_))
}

pub fn is_relationship(element: &GraphElement) -> bool {
    matches!(element, GraphElement::Relationship(_))
}

/// Partition an element sequence into nodes and relationships, keeping order.
pub fn split_elements(
    elements: impl IntoIterator<Item = GraphElement>,
) -> (Vec<GraphNode>, Vec<GraphRelationship>) {
    let mut nodes = Vec::new();
    let mut relationships = Vec::new();
    for element in elements {
        match element {
            GraphElement::Node(node) => nodes.push(node),
            GraphElement::Relationship(rel) => relationships.push(rel),
        }
    }
    (nodes, relationships)
}
