//! Invariants over generated documents.
//!
//! Letters inside `<damage>` are drawn from A-M, letters inside `<unclear>` from N-Z and
//! plain letters are lowercase, so every Character node reveals which wrapper it came from.

use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};
use tei_graph::{convert, GraphElement, Value};

fn atom() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-z]{1,3}",
        1 => "[A-M]{1,2}".prop_map(|s| format!("<damage>{s}</damage>")),
        1 => "[N-Z]{1,2}".prop_map(|s| format!(r#"<damage degree="high">{s}</damage>"#)),
        1 => "[N-Z]{1,2}".prop_map(|s| format!("<unclear>{s}</unclear>")),
    ]
}

fn word() -> impl Strategy<Value = String> {
    prop::collection::vec(atom(), 1..4).prop_map(|atoms| format!("<w>{}</w>", atoms.concat()))
}

fn line_part() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => word(),
        1 => "[a-z ]{1,3}",
        1 => Just("<pc>.</pc>".to_string()),
        1 => "[a-z]{1,2}".prop_map(|s| format!("<choice><corr>{s}</corr><sic>{s}</sic></choice>")),
    ]
}

fn line() -> impl Strategy<Value = String> {
    prop::collection::vec(line_part(), 1..6)
        .prop_map(|parts| format!("<line>{}</line>", parts.join(" ")))
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(line(), 1..4).prop_map(|lines| {
        format!(
            "<text><transliteration><surface><column>{}</column></surface></transliteration></text>",
            lines.join("\n")
        )
    })
}

proptest! {
    #[test]
    fn relationship_endpoints_are_nodes(source in document()) {
        let elements = convert(&source).unwrap();
        let node_ids: HashSet<_> = elements
            .iter()
            .filter_map(GraphElement::as_node)
            .map(|n| n.id)
            .collect();
        for rel in elements.iter().filter_map(GraphElement::as_relationship) {
            prop_assert!(node_ids.contains(&rel.start));
            prop_assert!(node_ids.contains(&rel.end));
        }
    }

    #[test]
    fn ids_are_unique_and_increasing(source in document()) {
        let elements = convert(&source).unwrap();
        let ids: Vec<_> = elements.iter().map(GraphElement::id).collect();
        prop_assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn conversion_is_deterministic(source in document()) {
        prop_assert_eq!(convert(&source).unwrap(), convert(&source).unwrap());
    }

    #[test]
    fn contains_positions_have_no_gaps(source in document()) {
        let elements = convert(&source).unwrap();
        let mut positions: BTreeMap<u64, Vec<i64>> = BTreeMap::new();
        for rel in elements.iter().filter_map(GraphElement::as_relationship) {
            if rel.label == "contains" {
                let pos = rel.property("pos").and_then(Value::as_integer);
                prop_assert!(pos.is_some());
                positions.entry(rel.start).or_default().extend(pos);
            }
        }
        for (_, mut pos) in positions {
            pos.sort_unstable();
            let expected: Vec<i64> = (0..pos.len() as i64).collect();
            prop_assert_eq!(pos, expected);
        }
    }

    #[test]
    fn wrapped_characters_carry_flags(source in document()) {
        let elements = convert(&source).unwrap();
        for node in elements.iter().filter_map(GraphElement::as_node) {
            if !node.has_label("Character") {
                continue;
            }
            let ch = node.property("text").and_then(Value::as_str).unwrap_or("");
            let first = ch.chars().next().unwrap_or('a');
            if first.is_ascii_lowercase() {
                prop_assert!(node.property("damage").is_none());
                prop_assert!(node.property("unclear").is_none());
            } else if ('A'..='M').contains(&first) {
                prop_assert_eq!(node.property("damage"), Some(&Value::Bool(true)));
            } else if node.property("damage").is_some() {
                prop_assert_eq!(node.property("damage"), Some(&Value::from("high")));
            } else {
                prop_assert_eq!(node.property("unclear"), Some(&Value::Bool(true)));
            }
        }
    }
}
