//! Cypher script output
//!
//! Emits one statement per graph element, in creation order, suitable for piping into a
//! property graph database shell. Every node and relationship carries its converter id as
//! the `_id` property; relationships find their endpoints through it.
//!
//! ```text
//! CREATE (:Thing:TextUnit:LinguisticUnit:Word {_id: 0, lemma: 'bēlu'});
//! CREATE (:Thing:TextUnit:LinguisticUnit:Character {_id: 1, text: 'b'});
//! MATCH (a {_id: 0}), (b {_id: 1}) CREATE (a)-[:contains {_id: 2, pos: 0}]->(b);
//! ```

use crate::error::ConvertError;
use crate::format::Format;
use crate::graph::{GraphElement, NodeId, Properties, Value};

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn identifier(name: &str) -> String {
    if is_plain_identifier(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::Bool(flag) => flag.to_string(),
        Value::Integer(number) => number.to_string(),
        Value::Text(text) => {
            let mut quoted = String::with_capacity(text.len() + 2);
            quoted.push('\'');
            for ch in text.chars() {
                match ch {
                    '\\' => quoted.push_str("\\\\"),
                    '\'' => quoted.push_str("\\'"),
                    '\n' => quoted.push_str("\\n"),
                    '\r' => quoted.push_str("\\r"),
                    '\t' => quoted.push_str("\\t"),
                    _ => quoted.push(ch),
                }
            }
            quoted.push('\'');
            quoted
        }
    }
}

fn property_map(id: NodeId, properties: &Properties) -> String {
    let mut entries = vec![format!("_id: {id}")];
    entries.extend(
        properties
            .iter()
            .map(|(key, value)| format!("{}: {}", identifier(key), literal(value))),
    );
    format!("{{{}}}", entries.join(", "))
}

/// Render a graph as a Cypher script.
pub fn to_cypher_str(elements: &[GraphElement]) -> String {
    let mut output = String::new();
    for element in elements {
        match element {
            GraphElement::Node(node) => {
                let labels: String = node
                    .labels
                    .iter()
                    .map(|label| format!(":{}", identifier(label)))
                    .collect();
                output.push_str(&format!(
                    "CREATE ({} {});\n",
                    labels,
                    property_map(node.id, &node.properties)
                ));
            }
            GraphElement::Relationship(rel) => {
                output.push_str(&format!(
                    "MATCH (a {{_id: {}}}), (b {{_id: {}}}) CREATE (a)-[:{} {}]->(b);\n",
                    rel.start,
                    rel.end,
                    identifier(&rel.label),
                    property_map(rel.id, &rel.properties)
                ));
            }
        }
    }
    output
}

/// Format implementation for Cypher scripts
#[derive(Default)]
pub struct CypherFormat;

impl Format for CypherFormat {
    fn name(&self) -> &str {
        "cypher"
    }

    fn description(&self) -> &str {
        "CREATE/MATCH statements for property graph databases"
    }

    fn file_extensions(&self) -> &[&str] {
        &["cypher", "cql"]
    }

    fn serialize(&self, elements: &[GraphElement]) -> Result<String, ConvertError> {
        Ok(to_cypher_str(elements))
    }
}
