//! Element-type specific node constructors.
//!
//! Each constructor builds one labeled node for a recognized element, copies
//! the relevant attributes into properties, registers the element -> node
//! mapping and wires the node to its structural parent. When the parent
//! element exists but has no node yet, the edge goes to the deferred worklist.

use super::context::{ConversionContext, LayerKind};
use super::helper::{self, NO_TAGS};
use super::relations::{self, DeferredRelation};
use crate::document::ElementId;
use crate::graph::{NodeId, Properties, Value};
use tracing::debug;

/// Node types produced from recognized tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Edition,
    TransliterationLayer,
    VocalisationLayer,
    Surface,
    Column,
    Line,
    Part,
    Segment,
    Sign,
    Stanza,
    Verse,
    Colon,
    Phrase,
    Word,
    Character,
    Alternatives,
    Alternative,
    Note,
    Annotation,
    Term,
    Translation,
}

const EDITION_LABELS: &[&str] = &["Thing", "EditionObject"];
const TRANSLITERATION_LABELS: &[&str] = &["Thing", "Layer", "TransliterationLayer"];
const VOCALISATION_LABELS: &[&str] = &["Thing", "Layer", "VocalisationLayer"];
const SURFACE_LABELS: &[&str] = &["Thing", "TextUnit", "VisualUnit", "Surface"];
const COLUMN_LABELS: &[&str] = &["Thing", "TextUnit", "VisualUnit", "Zone", "Column"];
const LINE_LABELS: &[&str] = &["Thing", "TextUnit", "VisualUnit", "Zone", "Line"];
const PART_LABELS: &[&str] = &["Thing", "TextUnit", "VisualUnit", "Zone", "Part"];
const SEGMENT_LABELS: &[&str] = &["Thing", "TextUnit", "VisualUnit", "Segment"];
const SIGN_LABELS: &[&str] = &["Thing", "TextUnit", "VisualUnit", "Sign"];
const STANZA_LABELS: &[&str] = &["Thing", "TextUnit", "LinguisticUnit", "Stanza"];
const VERSE_LABELS: &[&str] = &["Thing", "TextUnit", "LinguisticUnit", "Verse"];
const COLON_LABELS: &[&str] = &["Thing", "TextUnit", "LinguisticUnit", "Colon"];
const PHRASE_LABELS: &[&str] = &["Thing", "TextUnit", "LinguisticUnit", "Phrase"];
const WORD_LABELS: &[&str] = &["Thing", "TextUnit", "LinguisticUnit", "Word"];
const CHARACTER_LABELS: &[&str] = &["Thing", "TextUnit", "LinguisticUnit", "Character"];
const ALTERNATIVES_LABELS: &[&str] = &["Thing", relations::ALTERNATIVES];
const ALTERNATIVE_LABELS: &[&str] = &["Thing", relations::ALTERNATIVE];
const NOTE_LABELS: &[&str] = &["Thing", "Annotation", "Note"];
const ANNOTATION_LABELS: &[&str] = &["Thing", "Annotation"];
const TERM_LABELS: &[&str] = &["Thing", "Annotation", "Term"];
const TRANSLATION_LABELS: &[&str] = &["Thing", "TextUnit", "TranslationUnit"];

pub const EDITION_TAG: &str = "text";
pub const TRANSLITERATION_TAG: &str = "transliteration";
pub const PUNCTUATION_TAG: &str = "pc";
pub const GROUP_TAGS: &[&str] = &["choice", "app"];

// Candidate parent tags. Alternative members (corr, sic, ...) appear in every
// list so that a choice can wrap any structural unit.
const SURFACE_PARENTS: &[&str] = &[
    "transliteration", "corr", "sic", "reg", "orig", "abbr", "expan", "lem", "rdg",
];
const COLUMN_PARENTS: &[&str] = &[
    "surface", "corr", "sic", "reg", "orig", "abbr", "expan", "lem", "rdg",
];
const LINE_PARENTS: &[&str] = &[
    "column", "surface", "transliteration", "corr", "sic", "reg", "orig", "abbr", "expan",
    "lem", "rdg",
];
const PART_PARENTS: &[&str] = &[
    "line", "corr", "sic", "reg", "orig", "abbr", "expan", "lem", "rdg",
];
const SEGMENT_PARENTS: &[&str] = &[
    "part", "line", "corr", "sic", "reg", "orig", "abbr", "expan", "lem", "rdg",
];
const SIGN_PARENTS: &[&str] = &[
    "seg", "part", "line", "corr", "sic", "reg", "orig", "abbr", "expan", "lem", "rdg",
];
const STANZA_PARENTS: &[&str] = &[
    "vocalisation", "vocalization", "corr", "sic", "reg", "orig", "abbr", "expan", "lem", "rdg",
];
const VERSE_PARENTS: &[&str] = &[
    "lg", "vocalisation", "vocalization", "corr", "sic", "reg", "orig", "abbr", "expan", "lem",
    "rdg",
];
const COLON_PARENTS: &[&str] = &[
    "l", "corr", "sic", "reg", "orig", "abbr", "expan", "lem", "rdg",
];
const PHRASE_PARENTS: &[&str] = &[
    "cl", "l", "corr", "sic", "reg", "orig", "abbr", "expan", "lem", "rdg",
];
const WORD_PARENTS: &[&str] = &[
    "cl", "phr", "l", "seg", "part", "line", "corr", "sic", "reg", "orig", "abbr", "expan",
    "lem", "rdg",
];
const CHARACTER_PARENTS: &[&str] = &[
    "w", "corr", "sic", "reg", "orig", "abbr", "expan", "lem", "rdg",
];
const GROUP_PARENTS: &[&str] = &[
    "w", "seg", "part", "line", "column", "surface", "transliteration", "phr", "cl", "l", "lg",
    "vocalisation", "vocalization", "corr", "sic", "reg", "orig", "abbr", "expan", "lem", "rdg",
];

/// Elements an untargeted note annotates, or a term is mentioned by.
const ANCHOR_TAGS: &[&str] = &[
    "c", "sign", "pc", "w", "seg", "part", "line", "column", "surface", "phr", "cl", "l", "lg",
    "transliteration", "vocalisation", "vocalization", "text",
];

const UNIT_KEYS: &[&str] = &["id", "n", "type", "subtype", "rend", "lang"];
const WORD_KEYS: &[&str] = &["id", "n", "type", "lemma", "pos", "norm", "lang"];
const ATOM_KEYS: &[&str] = &["id", "n", "type", "ref", "cert"];
const ALTERNATIVE_KEYS: &[&str] = &["id", "type", "resp", "cert", "wit", "source", "reason"];
const ANNOTATION_KEYS: &[&str] = &["id", "n", "type", "subtype", "resp", "place", "lang"];
const TERM_KEYS: &[&str] = &["id", "type", "key", "ref", "lang"];
const REFERENCE_KEYS: &[&str] = &["target", "corresp"];

/// Build the node for a recognized element.
pub fn create(ctx: &mut ConversionContext, kind: ElementKind, element: ElementId) -> Option<NodeId> {
    match kind {
        ElementKind::Edition => edition(ctx, element),
        ElementKind::TransliterationLayer => {
            layer(ctx, element, LayerKind::Transliteration, TRANSLITERATION_LABELS)
        }
        ElementKind::VocalisationLayer => {
            layer(ctx, element, LayerKind::Vocalisation, VOCALISATION_LABELS)
        }
        ElementKind::Surface => numbered_unit(ctx, element, SURFACE_LABELS, SURFACE_PARENTS),
        ElementKind::Column => numbered_unit(ctx, element, COLUMN_LABELS, COLUMN_PARENTS),
        ElementKind::Line => numbered_unit(ctx, element, LINE_LABELS, LINE_PARENTS),
        ElementKind::Part => numbered_unit(ctx, element, PART_LABELS, PART_PARENTS),
        ElementKind::Segment => unit(ctx, element, SEGMENT_LABELS, SEGMENT_PARENTS, UNIT_KEYS),
        ElementKind::Sign => sign(ctx, element),
        ElementKind::Stanza => numbered_unit(ctx, element, STANZA_LABELS, STANZA_PARENTS),
        ElementKind::Verse => numbered_unit(ctx, element, VERSE_LABELS, VERSE_PARENTS),
        ElementKind::Colon => numbered_unit(ctx, element, COLON_LABELS, COLON_PARENTS),
        ElementKind::Phrase => phrase(ctx, element),
        ElementKind::Word => unit(ctx, element, WORD_LABELS, WORD_PARENTS, WORD_KEYS),
        ElementKind::Character => character(ctx, element),
        ElementKind::Alternatives => alternatives(ctx, element),
        ElementKind::Alternative => alternative(ctx, element),
        ElementKind::Note => annotation(ctx, element, NOTE_LABELS),
        ElementKind::Annotation => annotation(ctx, element, ANNOTATION_LABELS),
        ElementKind::Term => term(ctx, element),
        ElementKind::Translation => translation(ctx, element),
    }
}

/// Where a new node hangs in the structure.
enum Parent {
    Converted(NodeId),
    Pending(ElementId),
    Missing,
}

fn find_parent<S: AsRef<str>>(
    ctx: &ConversionContext,
    from: ElementId,
    candidates: &[&str],
    ignore: &[S],
) -> Parent {
    match helper::ancestor(ctx.document(), from, candidates, ignore) {
        Some(parent) => match ctx.node_for(parent) {
            Some(node) => Parent::Converted(node),
            None => Parent::Pending(parent),
        },
        None => Parent::Missing,
    }
}

fn attach(ctx: &mut ConversionContext, parent: Parent, node: NodeId) {
    match parent {
        Parent::Converted(container) => {
            relations::contains(ctx, container, node);
        }
        Parent::Pending(container) => ctx.defer(DeferredRelation::Contains {
            container,
            member: node,
        }),
        Parent::Missing => {}
    }
}

fn attribute_properties(ctx: &ConversionContext, element: ElementId, keys: &[&str]) -> Properties {
    helper::attributes(ctx.document(), element, Some(keys))
        .into_iter()
        .map(|(key, value)| (key, Value::Text(value)))
        .collect()
}

fn insert_text(ctx: &ConversionContext, element: ElementId, properties: &mut Properties) {
    let text = helper::normalized_text(ctx.document(), element);
    if !text.is_empty() {
        properties.insert("text".to_string(), Value::Text(text));
    }
}

/// Explicit `n`, or `auto-N` from the number of members the parent already has.
fn ordinal(ctx: &ConversionContext, element: ElementId, parent: &Parent) -> Value {
    match helper::attribute(ctx.document(), element, "n") {
        Some(n) if !n.is_empty() => Value::from(n),
        _ => {
            let count = match parent {
                Parent::Converted(node) => ctx.contained_count(*node),
                _ => 0,
            };
            Value::Text(format!("auto-{}", count + 1))
        }
    }
}

fn new_node(
    ctx: &mut ConversionContext,
    element: ElementId,
    labels: &[&str],
    properties: Properties,
) -> NodeId {
    let node = ctx.add_node(labels, properties);
    ctx.register(element, node);
    node
}

/// Copy damage / unclear / supplied wrappers around `from` onto an atomic node.
fn apply_wrapper_flags(ctx: &ConversionContext, from: ElementId, properties: &mut Properties) {
    let doc = ctx.document();
    if let Some(damage) = helper::ancestor(doc, from, &["damage"], NO_TAGS) {
        let value = helper::attribute(doc, damage, "degree")
            .or_else(|| helper::attribute(doc, damage, "agent"))
            .filter(|v| !v.is_empty())
            .map(Value::from)
            .unwrap_or(Value::Bool(true));
        properties.insert("damage".to_string(), value);
    }
    if helper::ancestor(doc, from, &["unclear"], NO_TAGS).is_some() {
        properties.insert("unclear".to_string(), Value::Bool(true));
    }
    if helper::ancestor(doc, from, &["supplied"], NO_TAGS).is_some() {
        properties.insert("supplied".to_string(), Value::Bool(true));
    }
}

fn edition(ctx: &mut ConversionContext, element: ElementId) -> Option<NodeId> {
    let properties = attribute_properties(ctx, element, UNIT_KEYS);
    Some(new_node(ctx, element, EDITION_LABELS, properties))
}

fn layer(
    ctx: &mut ConversionContext,
    element: ElementId,
    kind: LayerKind,
    labels: &[&str],
) -> Option<NodeId> {
    if let Some(existing) = ctx.layer(kind) {
        ctx.register(element, existing);
        return Some(existing);
    }

    let properties = attribute_properties(ctx, element, &["id", "type", "resp", "lang"]);
    let node = new_node(ctx, element, labels, properties);
    ctx.set_layer(kind, node);

    let edition = helper::ancestor(ctx.document(), element, &[EDITION_TAG], NO_TAGS)
        .and_then(|edition| ctx.node_for(edition));
    if let Some(edition) = edition {
        relations::has_layer(ctx, edition, node);
    }
    Some(node)
}

fn unit(
    ctx: &mut ConversionContext,
    element: ElementId,
    labels: &[&str],
    candidates: &[&str],
    keys: &[&str],
) -> Option<NodeId> {
    let parent = find_parent(ctx, element, candidates, NO_TAGS);
    let properties = attribute_properties(ctx, element, keys);
    let node = new_node(ctx, element, labels, properties);
    attach(ctx, parent, node);
    Some(node)
}

fn numbered_unit(
    ctx: &mut ConversionContext,
    element: ElementId,
    labels: &[&str],
    candidates: &[&str],
) -> Option<NodeId> {
    let parent = find_parent(ctx, element, candidates, NO_TAGS);
    let mut properties = attribute_properties(ctx, element, UNIT_KEYS);
    properties.insert("n".to_string(), ordinal(ctx, element, &parent));
    let node = new_node(ctx, element, labels, properties);
    attach(ctx, parent, node);
    Some(node)
}

fn phrase(ctx: &mut ConversionContext, element: ElementId) -> Option<NodeId> {
    let node = unit(ctx, element, PHRASE_LABELS, PHRASE_PARENTS, UNIT_KEYS)?;

    let doc = ctx.document();
    let Some(units) = helper::attribute(doc, element, "units") else {
        return Some(node);
    };
    for unit in helper::resolve_reference(doc, units) {
        match ctx.node_for(unit) {
            Some(member) => {
                relations::contains(ctx, node, member);
            }
            None => ctx.defer(DeferredRelation::ContainsUnit {
                container: node,
                unit,
            }),
        }
    }
    Some(node)
}

fn sign(ctx: &mut ConversionContext, element: ElementId) -> Option<NodeId> {
    let doc = ctx.document();
    let punctuation = helper::tag(doc, element) == PUNCTUATION_TAG;
    if punctuation && helper::ancestor(doc, element, &[TRANSLITERATION_TAG], NO_TAGS).is_none() {
        debug!("punctuation outside the transliteration layer skipped");
        return None;
    }

    let mut properties = attribute_properties(ctx, element, ATOM_KEYS);
    insert_text(ctx, element, &mut properties);
    if punctuation {
        properties.insert("punctuation".to_string(), Value::Bool(true));
    }
    apply_wrapper_flags(ctx, element, &mut properties);

    let ignore = ctx.options().ignore_elements.as_slice();
    let parent = find_parent(ctx, element, SIGN_PARENTS, ignore);
    let node = new_node(ctx, element, SIGN_LABELS, properties);
    ctx.record_sign(node);
    attach(ctx, parent, node);
    Some(node)
}

fn character(ctx: &mut ConversionContext, element: ElementId) -> Option<NodeId> {
    let mut properties = attribute_properties(ctx, element, ATOM_KEYS);
    insert_text(ctx, element, &mut properties);
    apply_wrapper_flags(ctx, element, &mut properties);

    let ignore = ctx.options().ignore_elements.as_slice();
    let parent = find_parent(ctx, element, CHARACTER_PARENTS, ignore);
    let node = new_node(ctx, element, CHARACTER_LABELS, properties);
    ctx.record_character(node);
    attach(ctx, parent, node);
    Some(node)
}

fn atom_from_text(
    ctx: &mut ConversionContext,
    from: ElementId,
    ch: char,
    labels: &[&str],
    candidates: &[&str],
) -> NodeId {
    let mut properties = Properties::new();
    properties.insert("text".to_string(), Value::from(ch));
    apply_wrapper_flags(ctx, from, &mut properties);

    let ignore = ctx.options().ignore_elements.as_slice();
    let parent = find_parent(ctx, from, candidates, ignore);
    let node = ctx.add_node(labels, properties);
    attach(ctx, parent, node);
    node
}

/// One Sign node for a character of graphical-layer text inside `from`.
pub fn sign_from_text(ctx: &mut ConversionContext, from: ElementId, ch: char) -> Option<NodeId> {
    let node = atom_from_text(ctx, from, ch, SIGN_LABELS, SIGN_PARENTS);
    ctx.record_sign(node);
    Some(node)
}

/// One Character node for a character of word text inside `from`.
pub fn character_from_text(
    ctx: &mut ConversionContext,
    from: ElementId,
    ch: char,
) -> Option<NodeId> {
    let node = atom_from_text(ctx, from, ch, CHARACTER_LABELS, CHARACTER_PARENTS);
    ctx.record_character(node);
    Some(node)
}

fn alternatives(ctx: &mut ConversionContext, element: ElementId) -> Option<NodeId> {
    let mut properties = attribute_properties(ctx, element, &["id", "type"]);
    properties.insert(
        "kind".to_string(),
        Value::from(helper::tag(ctx.document(), element)),
    );

    let ignore = ctx.options().ignore_elements.as_slice();
    let parent = find_parent(ctx, element, GROUP_PARENTS, ignore);
    let node = new_node(ctx, element, ALTERNATIVES_LABELS, properties);
    attach(ctx, parent, node);
    Some(node)
}

fn alternative(ctx: &mut ConversionContext, element: ElementId) -> Option<NodeId> {
    let doc = ctx.document();
    let mut properties = attribute_properties(ctx, element, ALTERNATIVE_KEYS);
    properties.insert("kind".to_string(), Value::from(helper::tag(doc, element)));
    let node = new_node(ctx, element, ALTERNATIVE_LABELS, properties);

    let group = helper::ancestor(doc, element, GROUP_TAGS, NO_TAGS)
        .and_then(|group| ctx.node_for(group));
    if let Some(group) = group {
        relations::alternative(ctx, group, node);
    }
    Some(node)
}

/// Elements named by the `target` / `corresp` attributes, and whether any
/// such attribute was present at all.
fn referenced_elements(ctx: &ConversionContext, element: ElementId) -> (bool, Vec<ElementId>) {
    let doc = ctx.document();
    let mut present = false;
    let mut targets = Vec::new();
    for key in REFERENCE_KEYS {
        if let Some(value) = helper::attribute(doc, element, key) {
            present = true;
            targets.extend(helper::resolve_reference(doc, value));
        }
    }
    (present, targets)
}

fn anchor_node(ctx: &ConversionContext, element: ElementId) -> Option<NodeId> {
    let doc = ctx.document();
    let parent = doc.parent(element)?;
    let ignore = ctx.options().ignore_elements.as_slice();
    helper::ancestor(doc, parent, ANCHOR_TAGS, ignore)
        .and_then(|anchor| ctx.node_for(anchor))
}

fn annotation(ctx: &mut ConversionContext, element: ElementId, labels: &[&str]) -> Option<NodeId> {
    let doc = ctx.document();
    let mut properties = attribute_properties(ctx, element, ANNOTATION_KEYS);
    properties.insert(
        "content".to_string(),
        Value::Text(helper::serialize(doc, element)),
    );
    insert_text(ctx, element, &mut properties);
    let node = new_node(ctx, element, labels, properties);

    let (has_references, targets) = referenced_elements(ctx, element);
    if !has_references {
        if let Some(anchor) = anchor_node(ctx, element) {
            relations::annotates(ctx, anchor, node);
        }
        return Some(node);
    }

    for target in targets {
        match ctx.node_for(target) {
            Some(target_node) => {
                relations::annotates(ctx, target_node, node);
            }
            None => ctx.defer(DeferredRelation::Annotates {
                target,
                annotation: node,
            }),
        }
    }
    Some(node)
}

fn term(ctx: &mut ConversionContext, element: ElementId) -> Option<NodeId> {
    let mut properties = attribute_properties(ctx, element, TERM_KEYS);
    insert_text(ctx, element, &mut properties);
    let node = new_node(ctx, element, TERM_LABELS, properties);

    if let Some(anchor) = anchor_node(ctx, element) {
        relations::mentions(ctx, anchor, node);
    }

    let (_, targets) = referenced_elements(ctx, element);
    for target in targets {
        match ctx.node_for(target) {
            Some(target_node) => {
                relations::refers_to(ctx, node, target_node);
            }
            None => ctx.defer(DeferredRelation::RefersTo { term: node, target }),
        }
    }
    Some(node)
}

fn translation(ctx: &mut ConversionContext, element: ElementId) -> Option<NodeId> {
    let doc = ctx.document();
    let mut properties = attribute_properties(ctx, element, UNIT_KEYS);
    insert_text(ctx, element, &mut properties);
    let node = new_node(ctx, element, TRANSLATION_LABELS, properties);

    let lang = helper::attribute(doc, element, "lang").filter(|lang| !lang.is_empty());
    let Some(corresp) = helper::attribute(doc, element, "corresp") else {
        return Some(node);
    };
    for source in helper::resolve_reference(doc, corresp) {
        match ctx.node_for(source) {
            Some(source_node) => {
                relations::translated_as(ctx, source_node, node, lang);
            }
            None => ctx.defer(DeferredRelation::TranslatedAs {
                source,
                translation: node,
                lang: lang.map(str::to_string),
            }),
        }
    }
    Some(node)
}
