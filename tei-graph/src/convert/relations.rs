//! Relationship construction.
//!
//! `contains` edges are filtered through a fixed containment table keyed by
//! node labels and numbered per start node. Every other relationship kind is
//! recorded as requested.

use super::context::ConversionContext;
use crate::document::ElementId;
use crate::graph::{NodeId, Properties, Value};
use tracing::debug;

pub const ALTERNATIVES: &str = "Alternatives";
pub const ALTERNATIVE: &str = "Alternative";

pub const CONTAINS: &str = "contains";
pub const EXPRESSED_AS: &str = "expressedAs";
pub const ALTERNATIVE_EDGE: &str = "alternative";
pub const ANNOTATED_BY: &str = "annotatedBy";
pub const ANNOTATES: &str = "annotates";
pub const HAS_LAYER: &str = "hasLayer";
pub const MENTIONS: &str = "mentions";
pub const REFERS_TO: &str = "refersTo";
pub const TRANSLATED_AS: &str = "translatedAs";

/// Allowed `contains` pairs: container label -> member labels. Every
/// container also accepts an `Alternatives` group.
const CONTAINMENT: &[(&str, &[&str])] = &[
    ("TransliterationLayer", &["Surface"]),
    ("Surface", &["Column"]),
    ("Column", &["Line"]),
    ("Line", &["Part", "Segment", "Sign", "Word"]),
    ("Part", &["Segment", "Sign"]),
    ("Segment", &["Sign"]),
    ("VocalisationLayer", &["Stanza", "Verse"]),
    ("Stanza", &["Verse"]),
    ("Verse", &["Colon"]),
    ("Colon", &["Word"]),
    ("Phrase", &["Word"]),
    ("Word", &["Character"]),
];

pub fn containment_allowed(start: &[String], end: &[String]) -> bool {
    CONTAINMENT.iter().any(|(container, members)| {
        start.iter().any(|label| label == container)
            && end
                .iter()
                .any(|label| label == ALTERNATIVES || members.contains(&label.as_str()))
    })
}

/// Record that `start` contains `end`.
///
/// Disallowed pairs are dropped silently. An `Alternative` start always
/// succeeds, with an `expressedAs` edge and no ordinal.
pub fn contains(ctx: &mut ConversionContext, start: NodeId, end: NodeId) -> Option<NodeId> {
    let start_node = ctx.node(start)?;
    let end_node = ctx.node(end)?;

    if start_node.has_label(ALTERNATIVE) {
        return Some(ctx.add_relationship(start, end, EXPRESSED_AS, Properties::new()));
    }
    if !containment_allowed(&start_node.labels, &end_node.labels) {
        debug!(
            start = start_node.kind(),
            end = end_node.kind(),
            "containment pair not allowed, relation dropped"
        );
        return None;
    }

    let pos = ctx.record_contained(start, end);
    let mut properties = Properties::new();
    properties.insert("pos".to_string(), Value::from(pos));
    Some(ctx.add_relationship(start, end, CONTAINS, properties))
}

/// Link an alternatives group to one of its alternatives. The first
/// alternative under a group is the preferred one.
pub fn alternative(ctx: &mut ConversionContext, start: NodeId, end: NodeId) -> NodeId {
    let order = ctx.next_alternative_order(start);
    let mut properties = Properties::new();
    properties.insert("order".to_string(), Value::from(order));
    properties.insert("pref".to_string(), Value::from(order == 1));
    ctx.add_relationship(start, end, ALTERNATIVE_EDGE, properties)
}

/// Record `start annotatedBy end` and the inverse `end annotates start`.
pub fn annotates(ctx: &mut ConversionContext, start: NodeId, end: NodeId) -> (NodeId, NodeId) {
    let by = ctx.add_relationship(start, end, ANNOTATED_BY, Properties::new());
    let inverse = ctx.add_relationship(end, start, ANNOTATES, Properties::new());
    (by, inverse)
}

pub fn has_layer(ctx: &mut ConversionContext, start: NodeId, end: NodeId) -> NodeId {
    ctx.add_relationship(start, end, HAS_LAYER, Properties::new())
}

pub fn mentions(ctx: &mut ConversionContext, start: NodeId, end: NodeId) -> NodeId {
    ctx.add_relationship(start, end, MENTIONS, Properties::new())
}

pub fn refers_to(ctx: &mut ConversionContext, start: NodeId, end: NodeId) -> NodeId {
    ctx.add_relationship(start, end, REFERS_TO, Properties::new())
}

pub fn translated_as(
    ctx: &mut ConversionContext,
    start: NodeId,
    end: NodeId,
    lang: Option<&str>,
) -> NodeId {
    let mut properties = Properties::new();
    if let Some(lang) = lang {
        properties.insert("lang".to_string(), Value::from(lang));
    }
    ctx.add_relationship(start, end, TRANSLATED_AS, properties)
}

/// A relation waiting for an element that had no node when it was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredRelation {
    /// The structural parent element was not converted yet.
    Contains { container: ElementId, member: NodeId },
    /// A phrase lists a unit that comes later in the document.
    ContainsUnit { container: NodeId, unit: ElementId },
    Annotates { target: ElementId, annotation: NodeId },
    RefersTo { term: NodeId, target: ElementId },
    TranslatedAs {
        source: ElementId,
        translation: NodeId,
        lang: Option<String>,
    },
}

impl DeferredRelation {
    /// The element whose node is still missing.
    pub fn source(&self) -> ElementId {
        match self {
            DeferredRelation::Contains { container, .. } => *container,
            DeferredRelation::ContainsUnit { unit, .. } => *unit,
            DeferredRelation::Annotates { target, .. } => *target,
            DeferredRelation::RefersTo { target, .. } => *target,
            DeferredRelation::TranslatedAs { source, .. } => *source,
        }
    }

    /// Build the relation if its source element now has a node.
    pub fn resolve(self, ctx: &mut ConversionContext) -> bool {
        let Some(resolved) = ctx.node_for(self.source()) else {
            return false;
        };
        match self {
            DeferredRelation::Contains { member, .. } => {
                contains(ctx, resolved, member).is_some()
            }
            DeferredRelation::ContainsUnit { container, .. } => {
                contains(ctx, container, resolved).is_some()
            }
            DeferredRelation::Annotates { annotation, .. } => {
                annotates(ctx, resolved, annotation);
                true
            }
            DeferredRelation::RefersTo { term, .. } => {
                refers_to(ctx, term, resolved);
                true
            }
            DeferredRelation::TranslatedAs {
                translation, lang, ..
            } => {
                translated_as(ctx, resolved, translation, lang.as_deref());
                true
            }
        }
    }
}
