//! Arena representation of a parsed markup document.

use std::collections::{BTreeMap, HashMap};

/// Index of an element inside its [`ParsedDocument`] arena.
///
/// Ids are assigned in preorder, so comparing two ids compares document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// One markup element, with parent and children stored as arena indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedElement {
    /// Tag name, in `{namespace}local` form when the element is namespaced.
    pub tag: String,
    /// Attributes. XML-namespace attributes are keyed `xml:name`, other
    /// namespaced attributes `{namespace}name`.
    pub attributes: BTreeMap<String, String>,
    /// Text before the first child element.
    pub text: Option<String>,
    /// Text following this element inside its parent, up to the next sibling.
    pub tail: Option<String>,
    pub children: Vec<ElementId>,
    pub parent: Option<ElementId>,
}

impl ParsedElement {
    pub fn new(tag: impl Into<String>, parent: Option<ElementId>) -> Self {
        ParsedElement {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            text: None,
            tail: None,
            children: Vec::new(),
            parent,
        }
    }
}

/// The element arena produced by the parser, plus an id lookup index.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    elements: Vec<ParsedElement>,
    ids: HashMap<String, ElementId>,
}

impl ParsedDocument {
    pub(crate) fn from_parts(elements: Vec<ParsedElement>, ids: HashMap<String, ElementId>) -> Self {
        ParsedDocument { elements, ids }
    }

    /// The root element. Every parsed document has one.
    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    pub fn get(&self, id: ElementId) -> &ParsedElement {
        &self.elements[id.0]
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements[id.0].parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.elements[id.0].children
    }

    /// Every element in preorder.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &ParsedElement)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, element)| (ElementId(index), element))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element carrying the given (already cleaned) `id` / `xml:id` value.
    /// The first element in document order wins on duplicates.
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.ids.get(id).copied()
    }
}
