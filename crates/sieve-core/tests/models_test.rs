use std::collections::BTreeSet;

use sieve_core::models::*;

const TABLE_JSON: &str = r#"{
  "tags": [
    {"name": "microbrewery", "partitions": ["brew-ns"], "keywords": ["brewery", "microbrewery", "beer"]},
    {"name": "food-policy", "partitions": ["food-a", "food-b"], "keywords": ["food", "restaurant"]},
    {"name": "general", "keywords": ["city"]},
    {"name": "zoning", "partitions": ["food-b"], "keywords": ["zoning"], "policy_broad": true}
  ]
}"#;

#[test]
fn namespace_table_parses_json() {
    let table = NamespaceTable::from_json(TABLE_JSON).unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(table.tag_names()[0], "microbrewery");
}

#[test]
fn policy_broad_defaults_from_name() {
    let table = NamespaceTable::from_json(TABLE_JSON).unwrap();
    assert!(!table.get("microbrewery").unwrap().is_policy_broad());
    assert!(table.get("food-policy").unwrap().is_policy_broad());
    assert!(table.get("zoning").unwrap().is_policy_broad());
}

#[test]
fn unmapped_and_unknown_tags_translate_to_themselves() {
    let table = NamespaceTable::from_json(TABLE_JSON).unwrap();
    assert_eq!(table.partitions_for("general"), vec!["general".to_string()]);
    assert_eq!(table.partitions_for("nope"), vec!["nope".to_string()]);
    assert_eq!(
        table.partitions_for("food-policy"),
        vec!["food-a".to_string(), "food-b".to_string()]
    );
}

#[test]
fn reverse_map_groups_tags_by_partition() {
    let table = NamespaceTable::from_json(TABLE_JSON).unwrap();
    let reverse = table.reverse_map();
    assert_eq!(
        reverse.get("food-b").unwrap(),
        &vec!["food-policy".to_string(), "zoning".to_string()]
    );
    assert_eq!(table.all_partitions().len(), 4);
}

#[test]
fn namespace_table_parses_toml() {
    let toml = r#"
[[tags]]
name = "permits"
partitions = ["permits-ns"]
keywords = ["permit", "license"]
"#;
    let table = NamespaceTable::from_toml(toml).unwrap();
    assert_eq!(table.partitions_for("permits"), vec!["permits-ns".to_string()]);
}

#[test]
fn hit_accessors_cover_both_variants() {
    let lexical: Hit = LexicalHit {
        id: "doc-1".into(),
        score: 4.2,
        partition: "p".into(),
        text: "raw text".into(),
    }
    .into();
    assert_eq!(lexical.source(), Source::Lexical);
    assert_eq!(lexical.metadata().get("text").unwrap(), "raw text");

    let vector: Hit = VectorHit {
        id: "doc-2".into(),
        score: 0.8,
        partition: "q".into(),
        metadata: Metadata::new(),
    }
    .into();
    assert_eq!(vector.source(), Source::Vector);
    assert_eq!(vector.id(), "doc-2");
    assert_eq!(vector.partition(), "q");
}

#[test]
fn vector_source_precedes_lexical() {
    assert!(Source::Vector < Source::Lexical);
}

#[test]
fn fused_result_reports_hybrid() {
    let result = FusedResult {
        id: "a".into(),
        score: 1.0,
        sources: BTreeSet::from([Source::Vector, Source::Lexical]),
        metadata: Metadata::new(),
        partition: "p".into(),
    };
    assert!(result.is_hybrid());
}

#[test]
fn building_or_failed_outcomes_are_not_cacheable() {
    let mut outcome = SearchOutcome {
        request_id: uuid::Uuid::new_v4(),
        query: "q".into(),
        top_k: 4,
        results: vec![],
        selected_tags: vec![],
        partitions_searched: vec![],
        partitions_failed: vec![],
        lexical_status: LexicalStatus::Ready,
    };
    assert!(outcome.is_cacheable());

    outcome.lexical_status = LexicalStatus::Disabled {
        reason: "empty corpus".into(),
    };
    assert!(outcome.is_cacheable());

    outcome.lexical_status = LexicalStatus::Building;
    assert!(!outcome.is_cacheable());

    outcome.lexical_status = LexicalStatus::Ready;
    outcome.partitions_failed.push(PartitionFailure {
        partition: "p".into(),
        reason: "timeout".into(),
    });
    assert!(!outcome.is_cacheable());
}
