//! Depth-first traversal of the parsed document.
//!
//! Every element is matched against a static tag table. Recognized tags are
//! handed to the node factory, then their leading text, children and tail are
//! processed in document order. Unrecognized tags are transparent: no node,
//! but their text and children are still walked.

use super::context::ConversionContext;
use super::helper;
use super::nodes::{self, ElementKind};
use super::text::{self, TextRun};
use crate::document::ElementId;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::{debug, warn};

static DISPATCH: Lazy<HashMap<&'static str, ElementKind>> = Lazy::new(|| {
    HashMap::from([
        ("text", ElementKind::Edition),
        ("transliteration", ElementKind::TransliterationLayer),
        ("vocalisation", ElementKind::VocalisationLayer),
        ("vocalization", ElementKind::VocalisationLayer),
        ("surface", ElementKind::Surface),
        ("column", ElementKind::Column),
        ("line", ElementKind::Line),
        ("part", ElementKind::Part),
        ("seg", ElementKind::Segment),
        ("sign", ElementKind::Sign),
        ("pc", ElementKind::Sign),
        ("lg", ElementKind::Stanza),
        ("l", ElementKind::Verse),
        ("cl", ElementKind::Colon),
        ("phr", ElementKind::Phrase),
        ("w", ElementKind::Word),
        ("c", ElementKind::Character),
        ("choice", ElementKind::Alternatives),
        ("app", ElementKind::Alternatives),
        ("corr", ElementKind::Alternative),
        ("sic", ElementKind::Alternative),
        ("reg", ElementKind::Alternative),
        ("orig", ElementKind::Alternative),
        ("abbr", ElementKind::Alternative),
        ("expan", ElementKind::Alternative),
        ("lem", ElementKind::Alternative),
        ("rdg", ElementKind::Alternative),
        ("note", ElementKind::Note),
        ("annotation", ElementKind::Annotation),
        ("term", ElementKind::Term),
        ("translation", ElementKind::Translation),
    ])
});

/// Node type for a local tag name, if the tag is recognized.
pub fn kind_for_tag(tag: &str) -> Option<ElementKind> {
    DISPATCH.get(tag).copied()
}

/// Walk the whole document, then resolve the deferred relations.
pub fn walk_document(ctx: &mut ConversionContext) {
    let root = ctx.document().root();
    walk(ctx, root);
    resolve_deferred(ctx);
}

/// Pending work of the traversal.
enum Frame {
    /// Convert an element at the given depth and schedule its children.
    Enter(ElementId, usize),
    /// All children are done: emit the element's tail.
    Exit(ElementId),
}

// Explicit stack so nesting depth is bounded by `max_depth`, not the call stack.
fn walk(ctx: &mut ConversionContext, root: ElementId) {
    let doc = ctx.document();
    let mut stack = vec![Frame::Enter(root, 0)];

    while let Some(frame) = stack.pop() {
        let (element, depth) = match frame {
            Frame::Enter(element, depth) => (element, depth),
            Frame::Exit(element) => {
                text::process(ctx, element, TextRun::Tail);
                continue;
            }
        };
        let tag = helper::tag(doc, element);

        if ctx.is_ignored_tree(tag) {
            text::process(ctx, element, TextRun::Tail);
            continue;
        }

        if !ctx.is_ignored_element(tag) {
            if let Some(kind) = kind_for_tag(tag) {
                nodes::create(ctx, kind, element);
            }
        }

        text::process(ctx, element, TextRun::Leading);
        stack.push(Frame::Exit(element));

        if ctx.is_ignored_subtree(tag) {
            continue;
        }
        let children = doc.children(element);
        if depth + 1 > ctx.options().max_depth {
            if !children.is_empty() {
                warn!(depth, tag, "maximum nesting depth reached, subtree skipped");
            }
            continue;
        }
        stack.extend(
            children
                .iter()
                .rev()
                .map(|&child| Frame::Enter(child, depth + 1)),
        );
    }
}

/// Resolve deferred relations in the order they were recorded. Entries whose
/// source element is ignored, or still has no node, are dropped.
fn resolve_deferred(ctx: &mut ConversionContext) {
    let doc = ctx.document();
    let pending = ctx.take_deferred();
    let total = pending.len();
    let mut resolved = 0;

    for relation in pending {
        let tag = helper::tag(doc, relation.source());
        if ctx.is_ignored_element(tag) || ctx.is_ignored_tree(tag) {
            debug!(tag, "deferred relation points at an ignored element");
            continue;
        }
        if relation.resolve(ctx) {
            resolved += 1;
        } else {
            debug!(tag, "deferred relation left unresolved");
        }
    }

    if total > 0 {
        debug!(total, resolved, "deferred relations processed");
    }
}
