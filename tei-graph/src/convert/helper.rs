//! Stateless queries over the element arena.
//!
//! Everything here takes the [`ParsedDocument`] explicitly and never touches
//! conversion state, so the node factory, text processor and walker can share
//! the same lookups.

use crate::document::{ElementId, ParsedDocument};
use std::collections::BTreeMap;

/// Convenience for [`ancestor`] calls without a skip-list.
pub const NO_TAGS: &[&str] = &[];

/// Strip a `{namespace}` or `prefix:` qualifier from a tag name.
pub fn local_name(tag: &str) -> &str {
    let tag = match tag.rfind('}') {
        Some(index) => &tag[index + 1..],
        None => tag,
    };
    match tag.rfind(':') {
        Some(index) => &tag[index + 1..],
        None => tag,
    }
}

/// Local tag name of an element.
pub fn tag(doc: &ParsedDocument, id: ElementId) -> &str {
    local_name(&doc.get(id).tag)
}

/// Attribute key without its `xml:` prefix or `{namespace}` qualifier.
pub fn clean_key(key: &str) -> &str {
    let key = key.strip_prefix("xml:").unwrap_or(key);
    match key.rfind('}') {
        Some(index) => &key[index + 1..],
        None => key,
    }
}

/// Cleaned attribute map. When `keys` is given only those cleaned names are kept.
pub fn attributes(
    doc: &ParsedDocument,
    id: ElementId,
    keys: Option<&[&str]>,
) -> BTreeMap<String, String> {
    doc.get(id)
        .attributes
        .iter()
        .map(|(key, value)| (clean_key(key), value.trim()))
        .filter(|(key, _)| keys.map_or(true, |keys| keys.contains(key)))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// A single attribute by its cleaned name.
pub fn attribute<'a>(doc: &'a ParsedDocument, id: ElementId, key: &str) -> Option<&'a str> {
    doc.get(id)
        .attributes
        .iter()
        .find(|(k, _)| clean_key(k) == key)
        .map(|(_, value)| value.trim())
}

/// Find the closest element, starting at `id` itself, whose tag is one of
/// `candidates`.
///
/// Elements whose tag is in `ignore` are transparent: the start element is
/// skipped when ignored, and ignored ancestors neither match nor stop the
/// ascent.
pub fn ancestor<S: AsRef<str>>(
    doc: &ParsedDocument,
    id: ElementId,
    candidates: &[&str],
    ignore: &[S],
) -> Option<ElementId> {
    let is_ignored = |tag: &str| ignore.iter().any(|skip| skip.as_ref() == tag);

    let mut current = if is_ignored(tag(doc, id)) {
        doc.parent(id)
    } else {
        Some(id)
    };

    while let Some(element) = current {
        let name = tag(doc, element);
        if !is_ignored(name) && candidates.contains(&name) {
            return Some(element);
        }
        current = doc.parent(element);
    }
    None
}

/// Resolve a reference that may list several space-separated targets, each
/// optionally prefixed with `#`.
pub fn find_by_id(doc: &ParsedDocument, reference: &str) -> Vec<ElementId> {
    reference
        .split_whitespace()
        .map(|target| target.trim_start_matches('#'))
        .filter(|target| !target.is_empty())
        .filter_map(|target| doc.element_by_id(target))
        .collect()
}

/// Evaluate `.//*[@attr='value']` against the whole document.
///
/// Only that attribute-equality pattern is understood; any other expression
/// matches nothing.
pub fn find_by_path_predicate(doc: &ParsedDocument, expr: &str) -> Vec<ElementId> {
    let Some((key, value)) = parse_attribute_predicate(expr) else {
        return Vec::new();
    };
    descendants(doc, doc.root(), None)
        .into_iter()
        .filter(|&id| attribute(doc, id, key) == Some(value))
        .collect()
}

fn parse_attribute_predicate(expr: &str) -> Option<(&str, &str)> {
    let inner = expr
        .trim()
        .strip_prefix(".//*[@")?
        .strip_suffix(']')?;
    let (key, quoted) = inner.split_once('=')?;
    let quoted = quoted.trim();
    let value = quoted
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .or_else(|| quoted.strip_prefix('"').and_then(|v| v.strip_suffix('"')))?;
    Some((clean_key(key.trim()), value))
}

/// Resolve a cross-reference attribute value to elements.
pub fn resolve_reference(doc: &ParsedDocument, value: &str) -> Vec<ElementId> {
    if value.trim_start().starts_with(".//") {
        find_by_path_predicate(doc, value)
    } else {
        find_by_id(doc, value)
    }
}

/// All descendants of `id` in document order, optionally only those with the
/// given local tag.
pub fn descendants(doc: &ParsedDocument, id: ElementId, tag_filter: Option<&str>) -> Vec<ElementId> {
    let mut found = Vec::new();
    let mut stack: Vec<ElementId> = doc.children(id).iter().rev().copied().collect();

    while let Some(current) = stack.pop() {
        if tag_filter.map_or(true, |wanted| tag(doc, current) == wanted) {
            found.push(current);
        }
        stack.extend(doc.children(current).iter().rev().copied());
    }
    found
}

/// All text inside an element: its leading text plus every descendant's text
/// and tail. The element's own tail is not included.
pub fn text_content(doc: &ParsedDocument, id: ElementId) -> String {
    let mut content = String::new();
    push_text_content(doc, id, &mut content);
    content
}

fn push_text_content(doc: &ParsedDocument, id: ElementId, out: &mut String) {
    let mut stack = vec![(id, false)];
    while let Some((current, closing)) = stack.pop() {
        let element = doc.get(current);
        if closing {
            if current != id {
                out.push_str(element.tail.as_deref().unwrap_or_default());
            }
            continue;
        }
        out.push_str(element.text.as_deref().unwrap_or_default());
        stack.push((current, true));
        stack.extend(element.children.iter().rev().map(|&child| (child, false)));
    }
}

/// Text content with runs of whitespace collapsed to single spaces.
pub fn normalized_text(doc: &ParsedDocument, id: ElementId) -> String {
    text_content(doc, id)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Namespace part of a `{namespace}local` tag.
pub fn namespace(tag: &str) -> Option<&str> {
    let rest = tag.strip_prefix('{')?;
    rest.split_once('}').map(|(namespace, _)| namespace)
}

/// Rebuild markup for a subtree, without the element's own tail.
///
/// Tags are written with their local names. A default `xmlns` declaration is
/// written on the subtree root and wherever an element's namespace differs
/// from its parent's, so the result parses back into the same namespaces.
/// Namespaced attributes other than `xml:*` lose their namespace.
pub fn serialize(doc: &ParsedDocument, id: ElementId) -> String {
    let mut out = String::new();
    let mut stack: Vec<(ElementId, bool, Option<&str>)> = vec![(id, false, None)];

    while let Some((current, closing, inherited)) = stack.pop() {
        let element = doc.get(current);
        let name = tag(doc, current);
        if closing {
            out.push_str("</");
            out.push_str(name);
            out.push('>');
            if current != id {
                if let Some(tail) = &element.tail {
                    out.push_str(&escape_text(tail));
                }
            }
            continue;
        }

        out.push('<');
        out.push_str(name);
        let own = namespace(&element.tag);
        if own != inherited {
            out.push_str(" xmlns=\"");
            out.push_str(&escape_attribute(own.unwrap_or_default()));
            out.push('"');
        }
        for (key, value) in &element.attributes {
            out.push(' ');
            out.push_str(serialized_key(key));
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }

        if element.children.is_empty() && element.text.is_none() {
            out.push_str("/>");
            if current != id {
                if let Some(tail) = &element.tail {
                    out.push_str(&escape_text(tail));
                }
            }
            continue;
        }

        out.push('>');
        if let Some(text) = &element.text {
            out.push_str(&escape_text(text));
        }
        stack.push((current, true, inherited));
        stack.extend(
            element
                .children
                .iter()
                .rev()
                .map(|&child| (child, false, own)),
        );
    }
    out
}

fn serialized_key(key: &str) -> &str {
    if key.starts_with("xml:") {
        key
    } else {
        clean_key(key)
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
