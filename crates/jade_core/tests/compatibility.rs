use jade_core::db::open_db_in_memory;
use jade_core::{
    AccessLevel, AtomRepository, CompatibilityService, InteractionKind, IntelligenceConfig,
    KnowledgeThreshold, RelationshipType, SkincareAtom, SkincareRelationship,
    SqliteAtomRepository,
};
use rusqlite::Connection;

fn add_atom(conn: &Connection, id: &str, title: &str) {
    SqliteAtomRepository::new(conn)
        .create_atom(&SkincareAtom::with_id(id, title))
        .unwrap();
}

fn add_edge(conn: &Connection, edge: SkincareRelationship) {
    SqliteAtomRepository::new(conn)
        .create_relationship(&edge)
        .unwrap();
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn conflicting_pair_is_reported_with_warning() {
    let conn = open_db_in_memory().unwrap();
    add_atom(&conn, "retinol", "Retinol");
    add_atom(&conn, "aha", "Glycolic Acid");
    add_edge(
        &conn,
        SkincareRelationship::new("retinol", "aha", RelationshipType::Conflicts)
            .with_mechanism("Stacked exfoliation compromises the barrier"),
    );
    let service = CompatibilityService::new(SqliteAtomRepository::new(&conn));

    let result = service
        .analyze_compatibility(&ids(&["retinol", "aha"]), AccessLevel::Public)
        .unwrap();
    assert_eq!(result.conflicts.len(), 1);
    assert!(result.synergies.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("Retinol"));
    assert!(result.warnings[0].contains("compromises the barrier"));
    assert!(result.tips.is_empty());
    assert_eq!(result.overall_score, 0);
    assert!(!result.compatible);
}

#[test]
fn synergy_pair_produces_tip_and_high_score() {
    let conn = open_db_in_memory().unwrap();
    add_atom(&conn, "vitc", "Vitamin C");
    add_atom(&conn, "vite", "Vitamin E");
    add_edge(
        &conn,
        SkincareRelationship::new("vite", "vitc", RelationshipType::Stabilizes).with_strength(0.6),
    );
    let service = CompatibilityService::new(SqliteAtomRepository::new(&conn));

    let result = service
        .analyze_compatibility(&ids(&["vitc", "vite"]), AccessLevel::Public)
        .unwrap();
    assert_eq!(result.synergies.len(), 1);
    assert_eq!(result.tips.len(), 1);
    assert!(result.warnings.is_empty());
    assert_eq!(result.overall_score, 90);
    assert!(result.compatible);
}

#[test]
fn silent_pairs_are_neutral() {
    let conn = open_db_in_memory().unwrap();
    add_atom(&conn, "a", "A");
    add_atom(&conn, "b", "B");
    let service = CompatibilityService::new(SqliteAtomRepository::new(&conn));

    let result = service
        .analyze_compatibility(&ids(&["a", "b"]), AccessLevel::Public)
        .unwrap();
    assert_eq!(result.interactions.len(), 1);
    assert_eq!(result.interactions[0].kind, InteractionKind::Neutral);
    assert!(result.interactions[0].relationship_type.is_none());
    assert!(result.synergies.is_empty() && result.conflicts.is_empty());
    assert_eq!(result.overall_score, 75);
}

#[test]
fn conflict_outweighs_synergy_for_same_pair() {
    let conn = open_db_in_memory().unwrap();
    add_atom(&conn, "a", "A");
    add_atom(&conn, "b", "B");
    add_edge(&conn, SkincareRelationship::new("a", "b", RelationshipType::Enhances));
    add_edge(&conn, SkincareRelationship::new("b", "a", RelationshipType::Inhibits));
    let service = CompatibilityService::new(SqliteAtomRepository::new(&conn));

    let result = service
        .analyze_compatibility(&ids(&["a", "b"]), AccessLevel::Public)
        .unwrap();
    assert_eq!(result.conflicts.len(), 1);
    assert!(result.synergies.is_empty());
    assert_eq!(
        result.conflicts[0].relationship_type,
        Some(RelationshipType::Inhibits)
    );
}

#[test]
fn unknown_and_hidden_atoms_are_dropped() {
    let conn = open_db_in_memory().unwrap();
    add_atom(&conn, "a", "A");
    SqliteAtomRepository::new(&conn)
        .create_atom(
            &SkincareAtom::with_id("gated", "Gated").with_threshold(KnowledgeThreshold::T8),
        )
        .unwrap();
    add_edge(&conn, SkincareRelationship::new("a", "gated", RelationshipType::Conflicts));
    let service = CompatibilityService::new(SqliteAtomRepository::new(&conn));

    let result = service
        .analyze_compatibility(&ids(&["a", "gated", "ghost", "a"]), AccessLevel::Registered)
        .unwrap();
    assert!(result.interactions.is_empty());
    assert!(result.warnings.is_empty());
    assert_eq!(result.overall_score, 100);
    assert!(result.compatible);
    assert_eq!(result.sequence_recommendation.len(), 1);

    let expert = service
        .analyze_compatibility(&ids(&["a", "gated"]), AccessLevel::Expert)
        .unwrap();
    assert_eq!(expert.conflicts.len(), 1);
}

#[test]
fn sequence_follows_precedes_edges_and_is_deterministic() {
    let conn = open_db_in_memory().unwrap();
    add_atom(&conn, "serum", "Serum");
    add_atom(&conn, "cleanser", "Cleanser");
    add_atom(&conn, "spf", "Sunscreen");
    add_edge(&conn, SkincareRelationship::new("cleanser", "serum", RelationshipType::Precedes));
    add_edge(&conn, SkincareRelationship::new("serum", "spf", RelationshipType::Precedes));
    let service = CompatibilityService::new(SqliteAtomRepository::new(&conn));

    let input = ids(&["spf", "serum", "cleanser"]);
    let first = service
        .analyze_compatibility(&input, AccessLevel::Public)
        .unwrap();
    let order: Vec<&str> = first
        .sequence_recommendation
        .iter()
        .map(|atom| atom.id.as_str())
        .collect();
    assert_eq!(order, vec!["cleanser", "serum", "spf"]);

    let second = service
        .analyze_compatibility(&input, AccessLevel::Public)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn compatible_threshold_comes_from_config() {
    let conn = open_db_in_memory().unwrap();
    add_atom(&conn, "a", "A");
    add_atom(&conn, "b", "B");
    let strict = CompatibilityService::with_config(
        SqliteAtomRepository::new(&conn),
        IntelligenceConfig {
            compatible_threshold: 80,
            ..IntelligenceConfig::default()
        },
    );

    let result = strict
        .analyze_compatibility(&ids(&["a", "b"]), AccessLevel::Public)
        .unwrap();
    assert_eq!(result.overall_score, 75);
    assert!(!result.compatible);
}
