//! Atomic nodes from text: wrappers, punctuation and whitespace folding.

use crate::common::{by_xml_id, contained_texts, fixture, nodes, text};
use tei_graph::{convert, Converter, ConvertOptions, Value};

#[test]
fn test_damage_and_unclear_flags() {
    let elements = convert(&fixture("tablet.xml")).unwrap();
    let chars = nodes(&elements, "Character");

    let damaged: Vec<_> = chars
        .iter()
        .filter(|c| c.property("damage").is_some())
        .map(|c| (text(c), c.property("damage").cloned()))
        .collect();
    assert_eq!(
        damaged,
        vec![
            ("r", Some(Value::from("low"))),
            ("u", Some(Value::from("low")))
        ]
    );

    let unclear: Vec<_> = chars
        .iter()
        .filter(|c| c.property("unclear") == Some(&Value::Bool(true)))
        .map(|c| text(c))
        .collect();
    assert_eq!(unclear, vec!["l"]);
}

#[test]
fn test_damage_without_degree_is_a_flag() {
    let elements = convert("<line><damage>ab</damage>c</line>").unwrap();
    let flags: Vec<_> = nodes(&elements, "Sign")
        .iter()
        .map(|s| s.property("damage").cloned())
        .collect();
    assert_eq!(
        flags,
        vec![Some(Value::Bool(true)), Some(Value::Bool(true)), None]
    );
}

#[test]
fn test_punctuation_outside_transliteration() {
    let elements = convert("<line><pc>.</pc></line>").unwrap();
    assert!(nodes(&elements, "Sign").is_empty());

    let elements = convert("<pc>.</pc>").unwrap();
    assert!(elements.is_empty());
}

#[test]
fn test_punctuation_inside_transliteration() {
    let elements = convert(&fixture("tablet.xml")).unwrap();
    let marks: Vec<_> = nodes(&elements, "Sign")
        .into_iter()
        .filter(|s| s.property("punctuation") == Some(&Value::Bool(true)))
        .collect();
    assert_eq!(marks.len(), 1);
    assert_eq!(text(marks[0]), ".");
}

#[test]
fn test_whitespace_is_folded_not_materialized() {
    let elements = convert("<line><w>ab</w> <w>c</w></line>").unwrap();
    let chars = nodes(&elements, "Character");
    assert_eq!(chars.len(), 3);
    assert!(chars.iter().all(|c| !text(c).trim().is_empty()));
    assert_eq!(chars[1].property("whitespace"), Some(&Value::from(" ")));
    assert!(chars[0].property("whitespace").is_none());
}

#[test]
fn test_signs_in_graphical_lines() {
    let elements = convert("<line>ka  ta</line>").unwrap();
    let line = nodes(&elements, "Line")[0];
    assert_eq!(contained_texts(&elements, line.id), vec!["k", "a", "t", "a"]);
    assert_eq!(
        nodes(&elements, "Sign")[1].property("whitespace"),
        Some(&Value::from("  "))
    );
}

#[test]
fn test_graphical_mark_keeps_spaces() {
    let elements = convert(r#"<line><g type="det">d x</g></line>"#).unwrap();
    let signs: Vec<_> = nodes(&elements, "Sign").into_iter().map(text).collect();
    assert_eq!(signs, vec!["d", " ", "x"]);
}

#[test]
fn test_explicit_characters_and_signs() {
    let elements = convert(
        r##"<line><sign ref="#KA">ka</sign><w><c type="vowel">a</c></w></line>"##,
    )
    .unwrap();
    let sign = nodes(&elements, "Sign")[0];
    assert_eq!(text(sign), "ka");
    assert_eq!(sign.property("ref"), Some(&Value::from("#KA")));

    let chars = nodes(&elements, "Character");
    assert_eq!(chars.len(), 1);
    assert_eq!(chars[0].property("type"), Some(&Value::from("vowel")));
}

#[test]
fn test_highlighting_is_transparent() {
    let elements = convert(r#"<line><w xml:id="w"><hi rend="sup">a</hi>b</w></line>"#).unwrap();
    let word = by_xml_id(&elements, "w");
    assert_eq!(contained_texts(&elements, word.id), vec!["a", "b"]);
}

#[test]
fn test_ignored_subtree_still_materializes_root() {
    let options = ConvertOptions {
        ignore_subtrees: vec!["w".to_string()],
        ..ConvertOptions::default()
    };
    let elements = Converter::new(options)
        .convert("<line><w>a<c>b</c></w></line>")
        .unwrap();
    // leading text is processed, children are not
    let chars: Vec<_> = nodes(&elements, "Character").into_iter().map(text).collect();
    assert_eq!(chars, vec!["a"]);
    assert_eq!(nodes(&elements, "Word").len(), 1);
}
