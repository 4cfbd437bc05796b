use jade_core::db::migrations::{schema_version, SCHEMA_VERSION};
use jade_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

const GRAPH_TABLES: [&str; 4] = ["atoms", "relationships", "atom_evidence", "products"];

fn table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name;")
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    names
}

#[test]
fn fresh_memory_database_has_graph_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    let names = table_names(&conn);
    for table in GRAPH_TABLES {
        assert!(names.iter().any(|name| name == table), "missing {table}");
    }
}

#[test]
fn reopening_a_graph_file_keeps_seeded_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.sqlite3");

    let conn = open_db(&path).unwrap();
    conn.execute("INSERT INTO atoms (id, title) VALUES ('retinol', 'Retinol');", [])
        .unwrap();
    drop(conn);

    let reopened = open_db(&path).unwrap();
    assert_eq!(schema_version(&reopened).unwrap(), SCHEMA_VERSION);
    let title: String = reopened
        .query_row("SELECT title FROM atoms WHERE id = 'retinol';", [], |row| row.get(0))
        .unwrap();
    assert_eq!(title, "Retinol");
}

#[test]
fn file_from_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("newer.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 42;")
        .unwrap();

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 42);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn threshold_column_rejects_unknown_tiers() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO atoms (id, title, knowledge_threshold) VALUES ('x', 'X', 'T9');",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn evidence_requires_an_existing_atom() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO atom_evidence (atom_id, claim, level) VALUES ('ghost', 'c', 'in_vitro');",
        [],
    );
    assert!(result.is_err());
}
