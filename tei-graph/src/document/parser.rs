use crate::document::element::{ElementId, ParsedDocument, ParsedElement};
use crate::error::ConvertError;
use roxmltree::{Attribute, Node, NodeType, ParsingOptions};
use std::collections::HashMap;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse markup text into an element arena.
///
/// Elements are numbered in preorder. Text before the first child element
/// becomes the element's `text`; text between a child and the next element
/// sibling (or the parent's end) becomes that child's `tail`. Comments and
/// processing instructions are dropped without splitting text runs.
pub fn parse_document(source: &str) -> Result<ParsedDocument, ConvertError> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let xml = roxmltree::Document::parse_with_options(source, options)
        .map_err(|e| ConvertError::MalformedDocument(format!("XML parsing error: {e}")))?;

    let mut elements: Vec<ParsedElement> = Vec::new();
    let mut ids: HashMap<String, ElementId> = HashMap::new();

    // Explicit stack so nesting depth is bounded by memory, not the call stack.
    let mut stack = vec![(xml.root_element(), None, None)];

    while let Some((node, parent, tail)) = stack.pop() {
        let id = ElementId(elements.len());
        let mut element = ParsedElement::new(qualified_tag(node), parent);
        element.tail = tail;

        for attribute in node.attributes() {
            element
                .attributes
                .insert(attribute_key(&attribute), attribute.value().to_string());
        }
        if let Some(value) = ["xml:id", "id"]
            .iter()
            .find_map(|key| element.attributes.get(*key))
        {
            ids.entry(value.trim().to_string()).or_insert(id);
        }

        let (text, children) = split_content(node);
        element.text = text;

        if let Some(parent) = parent {
            elements[parent.0].children.push(id);
        }
        elements.push(element);

        for (child, child_tail) in children.into_iter().rev() {
            stack.push((child, Some(id), child_tail));
        }
    }

    Ok(ParsedDocument::from_parts(elements, ids))
}

type ChildWithTail<'a, 'input> = (Node<'a, 'input>, Option<String>);

fn split_content<'a, 'input>(
    node: Node<'a, 'input>,
) -> (Option<String>, Vec<ChildWithTail<'a, 'input>>) {
    let mut leading: Option<String> = None;
    let mut children: Vec<ChildWithTail<'a, 'input>> = Vec::new();

    for child in node.children() {
        match child.node_type() {
            NodeType::Element => children.push((child, None)),
            NodeType::Text => {
                let text = child.text().unwrap_or_default();
                let slot = match children.last_mut() {
                    Some((_, tail)) => tail,
                    None => &mut leading,
                };
                slot.get_or_insert_with(String::new).push_str(text);
            }
            _ => {}
        }
    }

    (leading, children)
}

fn qualified_tag(node: Node) -> String {
    let name = node.tag_name();
    match name.namespace() {
        Some(namespace) => format!("{{{namespace}}}{}", name.name()),
        None => name.name().to_string(),
    }
}

fn attribute_key(attribute: &Attribute) -> String {
    match attribute.namespace() {
        Some(XML_NAMESPACE) => format!("xml:{}", attribute.name()),
        Some(namespace) => format!("{{{namespace}}}{}", attribute.name()),
        None => attribute.name().to_string(),
    }
}
