//! Structural nodes and containment.

use crate::common::{by_xml_id, contained_texts, fixture, node, nodes, relationships, text};
use tei_graph::{convert, convert_split, is_node, is_relationship, Value};

#[test]
fn test_minimal_line_with_word() {
    let elements = convert("<line><w>hi</w></line>").unwrap();

    let lines = nodes(&elements, "Line");
    let words = nodes(&elements, "Word");
    let chars = nodes(&elements, "Character");
    assert_eq!((lines.len(), words.len(), chars.len()), (1, 1, 2));
    assert_eq!(
        lines[0].labels,
        vec!["Thing", "TextUnit", "VisualUnit", "Zone", "Line"]
    );

    let contains = relationships(&elements, "contains");
    assert_eq!(contains.len(), 3);
    assert_eq!((contains[0].start, contains[0].end), (lines[0].id, words[0].id));
    assert_eq!(contains[0].property("pos"), Some(&Value::Integer(0)));

    assert_eq!(contained_texts(&elements, words[0].id), vec!["h", "i"]);
}

#[test]
fn test_split_keeps_relative_order() {
    let source = "<line><w>ab</w></line>";
    let elements = convert(source).unwrap();
    let (nodes, rels) = convert_split(source).unwrap();

    assert_eq!(nodes.len(), elements.iter().filter(|e| is_node(e)).count());
    assert_eq!(rels.len(), elements.iter().filter(|e| is_relationship(e)).count());
    assert!(nodes.windows(2).all(|pair| pair[0].id < pair[1].id));
    assert!(rels.windows(2).all(|pair| pair[0].id < pair[1].id));
}

#[test]
fn test_lines_are_numbered_within_column() {
    let elements = convert(
        r#"<transliteration><surface><column><line n="3"/><line/><line/></column></surface></transliteration>"#,
    )
    .unwrap();

    let numbers: Vec<_> = nodes(&elements, "Line")
        .iter()
        .map(|line| line.property("n").and_then(Value::as_str).unwrap().to_string())
        .collect();
    assert_eq!(numbers, vec!["3", "auto-2", "auto-3"]);
    assert_eq!(
        nodes(&elements, "Surface")[0].property("n"),
        Some(&Value::from("auto-1"))
    );
}

#[test]
fn test_disallowed_pairs_are_dropped() {
    // Verse -> Word is not a containment pair
    let elements = convert("<l><w>a</w></l>").unwrap();
    let verse = nodes(&elements, "Verse")[0];
    let word = nodes(&elements, "Word")[0];

    assert!(relationships(&elements, "contains")
        .iter()
        .all(|rel| rel.start != verse.id));
    assert_eq!(contained_texts(&elements, word.id), vec!["a"]);
}

#[test]
fn test_fixture_transliteration_layer() {
    let elements = convert(&fixture("tablet.xml")).unwrap();

    let edition = by_xml_id(&elements, "edition");
    assert_eq!(edition.kind(), "EditionObject");
    assert_eq!(edition.property("lang"), Some(&Value::from("akk")));

    let has_layer = relationships(&elements, "hasLayer");
    assert_eq!(has_layer.len(), 2);
    assert!(has_layer.iter().all(|rel| rel.start == edition.id));

    let lines = nodes(&elements, "Line");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].property("n"), Some(&Value::from("auto-2")));

    let w1 = by_xml_id(&elements, "w1");
    assert_eq!(w1.property("lemma"), Some(&Value::from("šarru")));
    assert_eq!(contained_texts(&elements, w1.id), vec!["š", "a", "r", "r", "u"]);

    // w1, w2 and the punctuation mark hang under the first line
    let members: Vec<_> = relationships(&elements, "contains")
        .into_iter()
        .filter(|rel| rel.start == lines[0].id)
        .map(|rel| node(&elements, rel.end).kind().to_string())
        .collect();
    assert_eq!(members, vec!["Word", "Word", "Sign"]);

    // header and facsimile never reach the graph
    assert!(elements
        .iter()
        .filter_map(|e| e.as_node())
        .all(|n| !text(n).contains("Letter")));
}

#[test]
fn test_fixture_vocalisation_layer() {
    let elements = convert(&fixture("tablet.xml")).unwrap();

    let stanza = nodes(&elements, "Stanza");
    let verse = by_xml_id(&elements, "v1");
    let colon = nodes(&elements, "Colon");
    assert_eq!(stanza.len(), 1);
    assert_eq!(verse.kind(), "Verse");
    assert_eq!(colon.len(), 1);

    let layer = nodes(&elements, "VocalisationLayer")[0];
    let contains = relationships(&elements, "contains");
    assert!(contains.iter().any(|r| r.start == layer.id && r.end == stanza[0].id));
    assert!(contains.iter().any(|r| r.start == stanza[0].id && r.end == verse.id));
    assert!(contains.iter().any(|r| r.start == verse.id && r.end == colon[0].id));

    let vw1 = by_xml_id(&elements, "vw1");
    assert!(contains.iter().any(|r| r.start == colon[0].id && r.end == vw1.id));
}

fn deeply_nested(depth: usize) -> String {
    format!(
        "<column><line>{}<w>ab</w>{}</line><line/></column>",
        "<div>".repeat(depth),
        "</div>".repeat(depth)
    )
}

#[test]
fn test_deep_nesting_below_depth_limit() {
    let elements = convert(&deeply_nested(9_000)).unwrap();

    let lines = nodes(&elements, "Line");
    let words = nodes(&elements, "Word");
    assert_eq!((lines.len(), words.len()), (2, 1));
    assert_eq!(contained_texts(&elements, words[0].id), vec!["a", "b"]);

    let contains = relationships(&elements, "contains");
    assert!(contains
        .iter()
        .any(|r| r.start == lines[0].id && r.end == words[0].id));
}

#[test]
fn test_deep_nesting_past_depth_limit_keeps_siblings() {
    let elements = convert(&deeply_nested(20_000)).unwrap();

    let lines = nodes(&elements, "Line");
    assert_eq!(lines.len(), 2);
    assert!(nodes(&elements, "Word").is_empty());
    assert!(nodes(&elements, "Character").is_empty());

    let contains = relationships(&elements, "contains");
    let positions: Vec<_> = contains
        .iter()
        .map(|r| (r.end, r.property("pos").cloned()))
        .collect();
    assert_eq!(
        positions,
        vec![
            (lines[0].id, Some(Value::Integer(0))),
            (lines[1].id, Some(Value::Integer(1)))
        ]
    );
}

#[test]
fn test_word_inside_segment_is_not_contained() {
    let elements = convert("<line><seg><w>a</w></seg></line>").unwrap();

    let word = nodes(&elements, "Word")[0];
    assert!(relationships(&elements, "contains")
        .iter()
        .all(|r| r.end != word.id));
    assert_eq!(contained_texts(&elements, word.id), vec!["a"]);
    assert!(contained_texts(&elements, nodes(&elements, "Segment")[0].id).is_empty());
}
