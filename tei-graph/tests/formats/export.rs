//! Serializing converted graphs through the registry.

use crate::common::fixture;
use insta::assert_snapshot;
use std::collections::HashMap;
use tei_graph::{convert, ConvertError, FormatRegistry, GraphElement};

fn options(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_summary_output() {
    let elements = convert("<line><w>hi</w></line>").unwrap();
    let summary = FormatRegistry::default()
        .serialize(&elements, "summary")
        .unwrap();
    assert_snapshot!(summary.trim_end(), @r"
    nodes: 4
      Character: 2
      Line: 1
      Word: 1
    relationships: 3
      contains: 3
    ");
}

#[test]
fn test_cypher_output() {
    let elements = convert("<w>a</w>").unwrap();
    let cypher = FormatRegistry::default()
        .serialize(&elements, "cypher")
        .unwrap();
    assert_snapshot!(cypher.trim_end(), @r"
    CREATE (:Thing:TextUnit:LinguisticUnit:Word {_id: 0});
    CREATE (:Thing:TextUnit:LinguisticUnit:Character {_id: 1, text: 'a'});
    MATCH (a {_id: 0}), (b {_id: 1}) CREATE (a)-[:contains {_id: 2, pos: 0}]->(b);
    ");
}

#[test]
fn test_json_round_trip_of_fixture() {
    let elements = convert(&fixture("tablet.xml")).unwrap();
    let registry = FormatRegistry::default();

    let json = registry
        .serialize_with_options(&elements, "json", &options(&[("pretty", "false")]))
        .unwrap();
    assert!(!json.contains('\n'));
    let back: Vec<GraphElement> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, elements);
}

#[test]
fn test_json_split_layout() {
    let elements = convert("<line><w>hi</w></line>").unwrap();
    let json = FormatRegistry::default()
        .serialize_with_options(&elements, "json", &options(&[("split", "true")]))
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(value["relationships"].as_array().unwrap().len(), 3);
    assert_eq!(value["nodes"][0]["labels"][4], "Line");
    assert_eq!(value["relationships"][0]["properties"]["pos"], 0);
}

#[test]
fn test_unknown_format() {
    let elements = convert("<w>a</w>").unwrap();
    let err = FormatRegistry::default()
        .serialize(&elements, "graphml")
        .unwrap_err();
    assert_eq!(err, ConvertError::FormatNotFound("graphml".to_string()));
}

#[test]
fn test_formats_without_parameters_reject_them() {
    let elements = convert("<w>a</w>").unwrap();
    let result = FormatRegistry::default().serialize_with_options(
        &elements,
        "cypher",
        &options(&[("pretty", "true")]),
    );
    assert!(matches!(result, Err(ConvertError::NotSupported(_))));
}
