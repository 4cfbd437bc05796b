//! Atom graph repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Resolve atoms, relationships and claim evidence by id.
//! - Serve one relationship lookup per traversal frontier and direction.
//!
//! # Invariants
//! - `list_atoms` order is the storage order; callers never re-sort.
//! - `relationships` returns edges grouped by frontier position, then by
//!   insertion order, so traversal output is deterministic.

use super::{RepoError, RepoResult};
use crate::model::atom::{AtomId, KnowledgeThreshold, SkincareAtom};
use crate::model::evidence::{ClaimEvidence, EvidenceLevel};
use crate::model::relationship::{RelationshipType, SkincareRelationship};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::HashMap;

const ATOM_SELECT_SQL: &str = "SELECT
    id,
    title,
    glance,
    scan,
    study,
    knowledge_threshold,
    why_it_works,
    causal_summary
FROM atoms";

const RELATIONSHIP_SELECT_SQL: &str = "SELECT
    id,
    from_atom_id,
    to_atom_id,
    relationship_type,
    strength,
    mechanism
FROM relationships";

/// Which endpoint of an edge is matched against the lookup ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// Edges whose `from_atom_id` is in the lookup set.
    Outgoing,
    /// Edges whose `to_atom_id` is in the lookup set.
    Incoming,
}

impl EdgeDirection {
    fn column(self) -> &'static str {
        match self {
            Self::Outgoing => "from_atom_id",
            Self::Incoming => "to_atom_id",
        }
    }

    /// Endpoint of `edge` matched by this direction.
    pub fn anchor(self, edge: &SkincareRelationship) -> &str {
        match self {
            Self::Outgoing => edge.from_atom_id.as_str(),
            Self::Incoming => edge.to_atom_id.as_str(),
        }
    }

    /// Endpoint of `edge` reached by following it in this direction.
    pub fn target(self, edge: &SkincareRelationship) -> &str {
        match self {
            Self::Outgoing => edge.to_atom_id.as_str(),
            Self::Incoming => edge.from_atom_id.as_str(),
        }
    }
}

/// Query options for listing atoms.
#[derive(Debug, Clone, Default)]
pub struct AtomListQuery {
    /// Case-insensitive substring filter on `title`.
    pub title_contains: Option<String>,
    /// Restrict to these ids.
    pub ids: Option<Vec<AtomId>>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Lookup interface over the atom graph.
pub trait AtomRepository {
    fn create_atom(&self, atom: &SkincareAtom) -> RepoResult<AtomId>;
    fn get_atom(&self, id: &str) -> RepoResult<Option<SkincareAtom>>;
    fn list_atoms(&self, query: &AtomListQuery) -> RepoResult<Vec<SkincareAtom>>;
    fn create_relationship(&self, relationship: &SkincareRelationship) -> RepoResult<String>;
    /// Edges touching any of `atom_ids` on the side selected by `direction`.
    fn relationships(
        &self,
        atom_ids: &[AtomId],
        direction: EdgeDirection,
    ) -> RepoResult<Vec<SkincareRelationship>>;
    /// Edges between `a` and `b` in either direction.
    fn relationships_between(&self, a: &str, b: &str) -> RepoResult<Vec<SkincareRelationship>>;
    /// Fails with `RepoError::NotFound` when the atom does not exist.
    fn add_evidence(&self, evidence: &ClaimEvidence) -> RepoResult<()>;
    fn list_evidence(&self, atom_id: &str) -> RepoResult<Vec<ClaimEvidence>>;
}

/// SQLite-backed atom graph repository.
pub struct SqliteAtomRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAtomRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AtomRepository for SqliteAtomRepository<'_> {
    fn create_atom(&self, atom: &SkincareAtom) -> RepoResult<AtomId> {
        atom.validate()?;

        self.conn.execute(
            "INSERT INTO atoms (
                id,
                title,
                glance,
                scan,
                study,
                knowledge_threshold,
                why_it_works,
                causal_summary
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                atom.id.as_str(),
                atom.title.as_str(),
                atom.glance.as_str(),
                atom.scan.as_str(),
                atom.study.as_str(),
                atom.knowledge_threshold.map(KnowledgeThreshold::as_str),
                atom.why_it_works.as_deref(),
                atom.causal_summary.as_deref(),
            ],
        )?;

        Ok(atom.id.clone())
    }

    fn get_atom(&self, id: &str) -> RepoResult<Option<SkincareAtom>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ATOM_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_atom_row(row)?));
        }

        Ok(None)
    }

    fn list_atoms(&self, query: &AtomListQuery) -> RepoResult<Vec<SkincareAtom>> {
        let mut sql = format!("{ATOM_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(needle) = query.title_contains.as_deref() {
            sql.push_str(" AND instr(lower(title), lower(?)) > 0");
            bind_values.push(Value::Text(needle.to_string()));
        }

        if let Some(ids) = query.ids.as_ref() {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            sql.push_str(&format!(" AND id IN ({})", placeholders(ids.len())));
            bind_values.extend(ids.iter().map(|id| Value::Text(id.clone())));
        }

        sql.push_str(" ORDER BY created_at ASC, rowid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut atoms = Vec::new();

        while let Some(row) = rows.next()? {
            atoms.push(parse_atom_row(row)?);
        }

        Ok(atoms)
    }

    fn create_relationship(&self, relationship: &SkincareRelationship) -> RepoResult<String> {
        relationship.validate()?;

        self.conn.execute(
            "INSERT INTO relationships (
                id,
                from_atom_id,
                to_atom_id,
                relationship_type,
                strength,
                mechanism
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                relationship.id.as_str(),
                relationship.from_atom_id.as_str(),
                relationship.to_atom_id.as_str(),
                relationship.relationship_type.as_str(),
                relationship.strength,
                relationship.mechanism.as_str(),
            ],
        )?;

        Ok(relationship.id.clone())
    }

    fn relationships(
        &self,
        atom_ids: &[AtomId],
        direction: EdgeDirection,
    ) -> RepoResult<Vec<SkincareRelationship>> {
        if atom_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "{RELATIONSHIP_SELECT_SQL} WHERE {} IN ({}) ORDER BY rowid ASC;",
            direction.column(),
            placeholders(atom_ids.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(atom_ids.iter()))?;
        let mut edges = Vec::new();
        while let Some(row) = rows.next()? {
            edges.push(parse_relationship_row(row)?);
        }

        let position: HashMap<&str, usize> = atom_ids
            .iter()
            .enumerate()
            .map(|(index, id)| (id.as_str(), index))
            .rev()
            .collect();
        edges.sort_by_key(|edge| {
            position
                .get(direction.anchor(edge))
                .copied()
                .unwrap_or(usize::MAX)
        });

        Ok(edges)
    }

    fn relationships_between(&self, a: &str, b: &str) -> RepoResult<Vec<SkincareRelationship>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RELATIONSHIP_SELECT_SQL}
             WHERE (from_atom_id = ?1 AND to_atom_id = ?2)
                OR (from_atom_id = ?2 AND to_atom_id = ?1)
             ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query(params![a, b])?;
        let mut edges = Vec::new();
        while let Some(row) = rows.next()? {
            edges.push(parse_relationship_row(row)?);
        }
        Ok(edges)
    }

    fn add_evidence(&self, evidence: &ClaimEvidence) -> RepoResult<()> {
        let atom_exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM atoms WHERE id = ?1);",
            [evidence.atom_id.as_str()],
            |row| row.get(0),
        )?;
        if !atom_exists {
            return Err(RepoError::NotFound(evidence.atom_id.clone()));
        }

        self.conn.execute(
            "INSERT INTO atom_evidence (atom_id, claim, level, source)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                evidence.atom_id.as_str(),
                evidence.claim.as_str(),
                evidence.level.as_str(),
                evidence.source.as_deref(),
            ],
        )?;
        Ok(())
    }

    fn list_evidence(&self, atom_id: &str) -> RepoResult<Vec<ClaimEvidence>> {
        let mut stmt = self.conn.prepare(
            "SELECT atom_id, claim, level, source
             FROM atom_evidence
             WHERE atom_id = ?1
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([atom_id])?;
        let mut evidence = Vec::new();
        while let Some(row) = rows.next()? {
            let level_text: String = row.get("level")?;
            let level = EvidenceLevel::parse(&level_text).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid evidence level `{level_text}` in atom_evidence.level"
                ))
            })?;
            evidence.push(ClaimEvidence {
                atom_id: row.get("atom_id")?,
                claim: row.get("claim")?,
                level,
                source: row.get("source")?,
            });
        }
        Ok(evidence)
    }
}

fn parse_atom_row(row: &Row<'_>) -> RepoResult<SkincareAtom> {
    let knowledge_threshold = match row.get::<_, Option<String>>("knowledge_threshold")? {
        Some(value) => Some(KnowledgeThreshold::parse(&value).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid knowledge threshold `{value}` in atoms.knowledge_threshold"
            ))
        })?),
        None => None,
    };

    let atom = SkincareAtom {
        id: row.get("id")?,
        title: row.get("title")?,
        glance: row.get("glance")?,
        scan: row.get("scan")?,
        study: row.get("study")?,
        knowledge_threshold,
        why_it_works: row.get("why_it_works")?,
        causal_summary: row.get("causal_summary")?,
    };
    atom.validate()?;
    Ok(atom)
}

fn parse_relationship_row(row: &Row<'_>) -> RepoResult<SkincareRelationship> {
    let type_text: String = row.get("relationship_type")?;
    let relationship = SkincareRelationship {
        id: row.get("id")?,
        from_atom_id: row.get("from_atom_id")?,
        to_atom_id: row.get("to_atom_id")?,
        relationship_type: RelationshipType::parse(&type_text),
        strength: row.get("strength")?,
        mechanism: row.get("mechanism")?,
    };
    relationship.validate()?;
    Ok(relationship)
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
