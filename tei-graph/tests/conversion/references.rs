//! Cross-references resolved by id: notes, terms, translations and phrase units.

use crate::common::{by_xml_id, fixture, nodes, relationships};
use tei_graph::{convert, Value};

#[test]
fn test_note_targeting_later_element() {
    let elements = convert(
        r##"<text><note target="#w1">x</note><line><w xml:id="w1">a</w></line></text>"##,
    )
    .unwrap();

    let note = nodes(&elements, "Note")[0];
    let word = by_xml_id(&elements, "w1");

    let annotates = relationships(&elements, "annotates");
    assert_eq!(annotates.len(), 1);
    assert_eq!((annotates[0].start, annotates[0].end), (note.id, word.id));

    let annotated_by = relationships(&elements, "annotatedBy");
    assert_eq!((annotated_by[0].start, annotated_by[0].end), (word.id, note.id));

    // the deferred pair is emitted after everything the walk produced
    let last_node = elements
        .iter()
        .filter_map(|e| e.as_node())
        .map(|n| n.id)
        .max()
        .unwrap();
    assert!(annotates[0].id > last_node);
}

#[test]
fn test_note_with_unknown_target_is_left_alone() {
    let elements = convert(r##"<text><note target="#nowhere">x</note></text>"##).unwrap();
    assert_eq!(nodes(&elements, "Note").len(), 1);
    assert!(relationships(&elements, "annotates").is_empty());
}

#[test]
fn test_note_keeps_markup_content() {
    let elements = convert(&fixture("tablet.xml")).unwrap();
    let notes = nodes(&elements, "Note");
    assert_eq!(notes.len(), 2);
    assert_eq!(
        notes[0].property("content"),
        Some(&Value::from(r##"<note xmlns="http://www.tei-c.org/ns/1.0" target="#w2">Reading <hi>uncertain</hi>.</note>"##))
    );
    assert_eq!(notes[0].property("text"), Some(&Value::from("Reading uncertain.")));

    let w2 = by_xml_id(&elements, "w2");
    let edition = by_xml_id(&elements, "edition");
    let annotates = relationships(&elements, "annotates");
    assert!(annotates.iter().any(|r| r.start == notes[0].id && r.end == w2.id));
    // an untargeted note annotates its nearest structural ancestor
    assert!(annotates.iter().any(|r| r.start == notes[1].id && r.end == edition.id));
}

#[test]
fn test_term_mentions_and_refers() {
    let elements = convert(&fixture("tablet.xml")).unwrap();
    let term = nodes(&elements, "Term")[0];
    assert_eq!(term.labels, vec!["Thing", "Annotation", "Term"]);
    assert_eq!(term.property("key"), Some(&Value::from("king")));

    let vw1 = by_xml_id(&elements, "vw1");
    let refers = relationships(&elements, "refersTo");
    assert_eq!((refers[0].start, refers[0].end), (term.id, vw1.id));

    let edition = by_xml_id(&elements, "edition");
    let mentions = relationships(&elements, "mentions");
    assert_eq!((mentions[0].start, mentions[0].end), (edition.id, term.id));
}

#[test]
fn test_translation_links_verse() {
    let elements = convert(&fixture("tablet.xml")).unwrap();
    let unit = nodes(&elements, "TranslationUnit")[0];
    let verse = by_xml_id(&elements, "v1");

    let translated = relationships(&elements, "translatedAs");
    assert_eq!(translated.len(), 1);
    assert_eq!((translated[0].start, translated[0].end), (verse.id, unit.id));
    assert_eq!(translated[0].property("lang"), Some(&Value::from("en")));
    assert_eq!(unit.property("text"), Some(&Value::from("The king, the god.")));
}

#[test]
fn test_translation_before_its_source() {
    let elements = convert(
        r##"<text><translation corresp="#v1">He spoke.</translation><l xml:id="v1"/></text>"##,
    )
    .unwrap();
    let translated = relationships(&elements, "translatedAs");
    assert_eq!(translated.len(), 1);
    assert!(translated[0].property("lang").is_none());
}

#[test]
fn test_phrase_units() {
    let elements = convert(&fixture("tablet.xml")).unwrap();
    let phrase = nodes(&elements, "Phrase")[0];
    let vw1 = by_xml_id(&elements, "vw1");
    let vw2 = by_xml_id(&elements, "vw2");

    let members: Vec<_> = relationships(&elements, "contains")
        .into_iter()
        .filter(|rel| rel.start == phrase.id)
        .map(|rel| (rel.end, rel.property("pos").and_then(Value::as_integer)))
        .collect();
    assert_eq!(members, vec![(vw1.id, Some(0)), (vw2.id, Some(1))]);
}

#[test]
fn test_phrase_units_declared_before_words() {
    let elements = convert(
        r##"<cl><phr units="#a #b"/><w xml:id="a">x</w><w xml:id="b">y</w></cl>"##,
    )
    .unwrap();
    let phrase = nodes(&elements, "Phrase")[0];
    let count = relationships(&elements, "contains")
        .iter()
        .filter(|rel| rel.start == phrase.id)
        .count();
    assert_eq!(count, 2);
}

#[test]
fn test_path_predicate_reference() {
    let elements = convert(
        r#"<text><w n="7">a</w><note target=".//*[@n='7']">x</note></text>"#,
    )
    .unwrap();
    let word = nodes(&elements, "Word")[0];
    let note = nodes(&elements, "Note")[0];
    let annotates = relationships(&elements, "annotates");
    assert_eq!((annotates[0].start, annotates[0].end), (note.id, word.id));
}
