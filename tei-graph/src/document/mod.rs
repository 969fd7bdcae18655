//! Markup parsing into an element arena.

pub mod element;
pub mod parser;

pub use element::{ElementId, ParsedDocument, ParsedElement};
pub use parser::parse_document;
