//! Character-level segmentation of text runs.
//!
//! Leading text belongs to the element that owns it; tail text belongs to
//! that element's parent. Inside a word every visible character becomes a
//! `Character` node, inside the graphical layer a `Sign` node. Whitespace is
//! folded onto the most recent atomic node of the matching kind as its
//! `whitespace` property.

use super::context::ConversionContext;
use super::helper::{self, NO_TAGS};
use super::nodes;
use crate::document::{ElementId, ParsedDocument};
use crate::graph::{GraphNode, NodeId, Value};

/// Which run of an element is being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRun {
    Leading,
    Tail,
}

/// Atomic node type a run of text turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomKind {
    Sign,
    Character,
}

pub type AtomConstructor = fn(&mut ConversionContext, ElementId, char) -> Option<NodeId>;

const WORD_CONTEXT: &[&str] = &["w"];
const GRAPHICAL_CONTEXT: &[&str] = &["line", "part", "seg", "g"];
const GRAPHICAL_MARK: &str = "g";

/// Elements whose text is represented by their own node, or not at all.
const OPAQUE_TAGS: &[&str] = &["sign", "pc", "c", "note", "annotation", "term", "translation"];

/// Atomic node type for text directly inside `element`.
pub fn classify(doc: &ParsedDocument, element: ElementId) -> Option<AtomKind> {
    if helper::ancestor(doc, element, WORD_CONTEXT, NO_TAGS).is_some() {
        Some(AtomKind::Character)
    } else if helper::ancestor(doc, element, GRAPHICAL_CONTEXT, NO_TAGS).is_some() {
        Some(AtomKind::Sign)
    } else {
        None
    }
}

fn constructor(kind: AtomKind) -> AtomConstructor {
    match kind {
        AtomKind::Sign => nodes::sign_from_text,
        AtomKind::Character => nodes::character_from_text,
    }
}

/// Segment the leading or tail text of `element` into atomic nodes.
pub fn process(ctx: &mut ConversionContext, element: ElementId, run: TextRun) {
    let doc = ctx.document();
    let (text, context) = match run {
        TextRun::Leading => (doc.get(element).text.as_deref(), Some(element)),
        TextRun::Tail => (doc.get(element).tail.as_deref(), doc.parent(element)),
    };
    let (Some(text), Some(context)) = (text, context) else {
        return;
    };
    if helper::ancestor(doc, context, OPAQUE_TAGS, NO_TAGS).is_some() {
        return;
    }

    // Whitespace after a closing tag joins the atoms of the element it follows.
    let whitespace_kind = classify(doc, element);
    let kind = classify(doc, context);
    segment(ctx, text, context, kind, whitespace_kind);
}

fn segment(
    ctx: &mut ConversionContext,
    text: &str,
    context: ElementId,
    kind: Option<AtomKind>,
    whitespace_kind: Option<AtomKind>,
) {
    let verbatim = helper::ancestor(ctx.document(), context, &[GRAPHICAL_MARK], NO_TAGS).is_some();
    let mut pending = String::new();

    for ch in text.chars() {
        if ch.is_whitespace() && !verbatim {
            pending.push(ch);
            continue;
        }
        fold_whitespace(ctx, whitespace_kind, &mut pending);
        if let Some(kind) = kind {
            constructor(kind)(ctx, context, ch);
        }
    }
    fold_whitespace(ctx, whitespace_kind, &mut pending);
}

fn fold_whitespace(ctx: &mut ConversionContext, kind: Option<AtomKind>, pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    let target = match kind {
        Some(AtomKind::Sign) => ctx.last_sign_mut(),
        Some(AtomKind::Character) => ctx.last_character_mut(),
        None => None,
    };
    if let Some(node) = target {
        append_whitespace(node, pending);
    }
    pending.clear();
}

fn append_whitespace(node: &mut GraphNode, whitespace: &str) {
    match node.properties.get_mut("whitespace") {
        Some(Value::Text(existing)) => existing.push_str(whitespace),
        _ => {
            node.properties
                .insert("whitespace".to_string(), Value::from(whitespace));
        }
    }
}
