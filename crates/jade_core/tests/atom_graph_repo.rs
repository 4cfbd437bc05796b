use jade_core::db::open_db_in_memory;
use jade_core::{
    AtomListQuery, AtomRepository, ClaimEvidence, EdgeDirection, EvidenceLevel,
    KnowledgeThreshold, RelationshipType, RepoError, SkincareAtom, SkincareRelationship,
    SqliteAtomRepository,
};

fn seed_atoms(repo: &SqliteAtomRepository<'_>, ids: &[&str]) {
    for id in ids {
        repo.create_atom(&SkincareAtom::with_id(*id, id.to_uppercase()))
            .unwrap();
    }
}

#[test]
fn create_and_get_preserves_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAtomRepository::new(&conn);

    let mut atom =
        SkincareAtom::with_id("retinol", "Retinol").with_threshold(KnowledgeThreshold::T4);
    atom.glance = "Vitamin A derivative".to_string();
    atom.why_it_works = Some("Binds retinoic acid receptors".to_string());
    atom.causal_summary = Some("Speeds cell turnover".to_string());
    repo.create_atom(&atom).unwrap();

    let loaded = repo.get_atom("retinol").unwrap().unwrap();
    assert_eq!(loaded, atom);
}

#[test]
fn get_missing_atom_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAtomRepository::new(&conn);
    assert!(repo.get_atom("missing").unwrap().is_none());
}

#[test]
fn create_rejects_blank_title() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAtomRepository::new(&conn);
    let err = repo
        .create_atom(&SkincareAtom::with_id("blank", " "))
        .unwrap_err();
    assert!(matches!(err, RepoError::AtomValidation(_)));
}

#[test]
fn list_atoms_preserves_insertion_order_and_filters() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAtomRepository::new(&conn);
    seed_atoms(&repo, &["zinc", "aloe", "niacinamide"]);

    let all: Vec<String> = repo
        .list_atoms(&AtomListQuery::default())
        .unwrap()
        .into_iter()
        .map(|atom| atom.id)
        .collect();
    assert_eq!(all, vec!["zinc", "aloe", "niacinamide"]);

    let by_title = repo
        .list_atoms(&AtomListQuery {
            title_contains: Some("NIA".to_string()),
            ..AtomListQuery::default()
        })
        .unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].id, "niacinamide");

    let paged = repo
        .list_atoms(&AtomListQuery {
            limit: Some(1),
            offset: 1,
            ..AtomListQuery::default()
        })
        .unwrap();
    assert_eq!(paged[0].id, "aloe");

    let none = repo
        .list_atoms(&AtomListQuery {
            ids: Some(Vec::new()),
            ..AtomListQuery::default()
        })
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn relationships_are_grouped_by_frontier_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAtomRepository::new(&conn);
    seed_atoms(&repo, &["a", "b", "c", "d"]);

    let b_to_d = SkincareRelationship::new("b", "d", RelationshipType::Causes);
    let a_to_c = SkincareRelationship::new("a", "c", RelationshipType::Causes);
    let a_to_d = SkincareRelationship::new("a", "d", RelationshipType::Enhances);
    repo.create_relationship(&b_to_d).unwrap();
    repo.create_relationship(&a_to_c).unwrap();
    repo.create_relationship(&a_to_d).unwrap();

    let outgoing = repo
        .relationships(&["a".to_string(), "b".to_string()], EdgeDirection::Outgoing)
        .unwrap();
    let ids: Vec<&str> = outgoing.iter().map(|edge| edge.id.as_str()).collect();
    assert_eq!(ids, vec![a_to_c.id.as_str(), a_to_d.id.as_str(), b_to_d.id.as_str()]);

    let incoming = repo
        .relationships(&["d".to_string()], EdgeDirection::Incoming)
        .unwrap();
    assert_eq!(incoming.len(), 2);
    assert!(repo
        .relationships(&[], EdgeDirection::Outgoing)
        .unwrap()
        .is_empty());
}

#[test]
fn relationships_between_matches_either_direction() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAtomRepository::new(&conn);
    seed_atoms(&repo, &["a", "b"]);

    let forward = SkincareRelationship::new("a", "b", RelationshipType::Enhances)
        .with_strength(0.8)
        .with_mechanism("Stabilizes pH");
    let backward = SkincareRelationship::new("b", "a", RelationshipType::Conflicts);
    repo.create_relationship(&forward).unwrap();
    repo.create_relationship(&backward).unwrap();

    let edges = repo.relationships_between("b", "a").unwrap();
    assert_eq!(edges, vec![forward, backward]);
}

#[test]
fn unknown_relationship_types_survive_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAtomRepository::new(&conn);
    seed_atoms(&repo, &["a", "b"]);

    let edge = SkincareRelationship::new("a", "b", RelationshipType::parse("occludes"));
    repo.create_relationship(&edge).unwrap();

    let loaded = repo.relationships_between("a", "b").unwrap();
    assert_eq!(
        loaded[0].relationship_type,
        RelationshipType::Other("occludes".to_string())
    );
}

#[test]
fn evidence_round_trips_in_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAtomRepository::new(&conn);
    seed_atoms(&repo, &["retinol"]);

    let mut first =
        ClaimEvidence::new("retinol", "Reduces fine lines", EvidenceLevel::ClinicalTrial);
    first.source = Some("doi:10.1000/example".to_string());
    let second = ClaimEvidence::new("retinol", "Boosts collagen", EvidenceLevel::InVitro);
    repo.add_evidence(&first).unwrap();
    repo.add_evidence(&second).unwrap();

    assert_eq!(repo.list_evidence("retinol").unwrap(), vec![first, second]);
    assert!(repo.list_evidence("missing").unwrap().is_empty());
}

#[test]
fn evidence_for_unknown_atom_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAtomRepository::new(&conn);

    let err = repo
        .add_evidence(&ClaimEvidence::new("ghost", "Anything", EvidenceLevel::Anecdotal))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == "ghost"));
}
