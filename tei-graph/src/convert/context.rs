//! Mutable state threaded through one conversion run.

use super::relations::DeferredRelation;
use super::ConvertOptions;
use crate::document::{ElementId, ParsedDocument};
use crate::graph::{GraphElement, GraphNode, GraphRelationship, NodeId, Properties};
use std::collections::HashMap;

/// Layers materialized at most once per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Transliteration,
    Vocalisation,
}

/// State owned by a single conversion call.
///
/// Holds the id counter, the emitted elements and every lookup the factories
/// need. A context is created per call and dropped with it; it is never shared
/// between conversions.
pub struct ConversionContext<'a> {
    document: &'a ParsedDocument,
    options: &'a ConvertOptions,
    next_id: NodeId,
    elements: Vec<GraphElement>,
    /// Node id -> index into `elements`.
    slots: HashMap<NodeId, usize>,
    element_nodes: HashMap<ElementId, NodeId>,
    /// Targets of `contains` edges per start node, in `pos` order.
    contained: HashMap<NodeId, Vec<NodeId>>,
    alternatives: HashMap<NodeId, usize>,
    layers: HashMap<LayerKind, NodeId>,
    deferred: Vec<DeferredRelation>,
    /// Slots of emitted Sign nodes, in emission order.
    sign_index: Vec<usize>,
    /// Slots of emitted Character nodes, in emission order.
    character_index: Vec<usize>,
}

impl<'a> ConversionContext<'a> {
    pub fn new(document: &'a ParsedDocument, options: &'a ConvertOptions) -> Self {
        ConversionContext {
            document,
            options,
            next_id: 0,
            elements: Vec::new(),
            slots: HashMap::new(),
            element_nodes: HashMap::new(),
            contained: HashMap::new(),
            alternatives: HashMap::new(),
            layers: HashMap::new(),
            deferred: Vec::new(),
            sign_index: Vec::new(),
            character_index: Vec::new(),
        }
    }

    pub fn document(&self) -> &'a ParsedDocument {
        self.document
    }

    pub fn options(&self) -> &'a ConvertOptions {
        self.options
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_node(&mut self, labels: &[&str], properties: Properties) -> NodeId {
        let id = self.allocate_id();
        self.slots.insert(id, self.elements.len());
        self.elements.push(GraphElement::Node(GraphNode {
            id,
            labels: labels.iter().map(|label| label.to_string()).collect(),
            properties,
        }));
        id
    }

    pub fn add_relationship(
        &mut self,
        start: NodeId,
        end: NodeId,
        label: &str,
        properties: Properties,
    ) -> NodeId {
        let id = self.allocate_id();
        self.elements
            .push(GraphElement::Relationship(GraphRelationship {
                id,
                start,
                end,
                label: label.to_string(),
                properties,
            }));
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        let slot = *self.slots.get(&id)?;
        self.elements[slot].as_node()
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut GraphNode> {
        let slot = *self.slots.get(&id)?;
        match &mut self.elements[slot] {
            GraphElement::Node(node) => Some(node),
            GraphElement::Relationship(_) => None,
        }
    }

    pub fn register(&mut self, element: ElementId, node: NodeId) {
        self.element_nodes.insert(element, node);
    }

    pub fn node_for(&self, element: ElementId) -> Option<NodeId> {
        self.element_nodes.get(&element).copied()
    }

    pub fn contained_count(&self, start: NodeId) -> usize {
        self.contained.get(&start).map_or(0, Vec::len)
    }

    /// Append `end` to the adjacency index of `start`, returning its `pos`.
    pub fn record_contained(&mut self, start: NodeId, end: NodeId) -> usize {
        let members = self.contained.entry(start).or_default();
        members.push(end);
        members.len() - 1
    }

    /// 1-based order of the next alternative under `start`.
    pub fn next_alternative_order(&mut self, start: NodeId) -> usize {
        let count = self.alternatives.entry(start).or_insert(0);
        *count += 1;
        *count
    }

    pub fn layer(&self, kind: LayerKind) -> Option<NodeId> {
        self.layers.get(&kind).copied()
    }

    pub fn set_layer(&mut self, kind: LayerKind, node: NodeId) {
        self.layers.insert(kind, node);
    }

    pub fn defer(&mut self, relation: DeferredRelation) {
        self.deferred.push(relation);
    }

    pub fn take_deferred(&mut self) -> Vec<DeferredRelation> {
        std::mem::take(&mut self.deferred)
    }

    pub fn record_sign(&mut self, node: NodeId) {
        if let Some(&slot) = self.slots.get(&node) {
            self.sign_index.push(slot);
        }
    }

    /// Most recently emitted Sign node.
    pub fn last_sign_mut(&mut self) -> Option<&mut GraphNode> {
        let slot = *self.sign_index.last()?;
        match &mut self.elements[slot] {
            GraphElement::Node(node) => Some(node),
            GraphElement::Relationship(_) => None,
        }
    }

    pub fn record_character(&mut self, node: NodeId) {
        if let Some(&slot) = self.slots.get(&node) {
            self.character_index.push(slot);
        }
    }

    /// Most recently emitted Character node.
    pub fn last_character_mut(&mut self) -> Option<&mut GraphNode> {
        let slot = *self.character_index.last()?;
        match &mut self.elements[slot] {
            GraphElement::Node(node) => Some(node),
            GraphElement::Relationship(_) => None,
        }
    }

    pub fn is_ignored_element(&self, tag: &str) -> bool {
        self.options.ignore_elements.iter().any(|t| t == tag)
    }

    pub fn is_ignored_subtree(&self, tag: &str) -> bool {
        self.options.ignore_subtrees.iter().any(|t| t == tag)
    }

    pub fn is_ignored_tree(&self, tag: &str) -> bool {
        self.options.ignore_trees.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn into_elements(self) -> Vec<GraphElement> {
        self.elements
    }
}
