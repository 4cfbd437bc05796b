//! Ordered schema scripts for the graph read-model.
//!
//! The applied version lives in `PRAGMA user_version`. Pending scripts run
//! inside one transaction, so a failed upgrade leaves the file untouched.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: [Migration; 3] = [
    Migration {
        version: 1,
        name: "atom_graph",
        sql: include_str!("0001_atom_graph.sql"),
    },
    Migration {
        version: 2,
        name: "atom_evidence",
        sql: include_str!("0002_atom_evidence.sql"),
    },
    Migration {
        version: 3,
        name: "products",
        sql: include_str!("0003_products.sql"),
    },
];

/// Schema version produced by the newest script.
pub const SCHEMA_VERSION: u32 = MIGRATIONS[MIGRATIONS.len() - 1].version;

/// Version recorded in the open database.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings `conn` up to [`SCHEMA_VERSION`].
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        debug!("event=db_migrate module=db status=ok version={found} applied=0");
        return Ok(());
    }

    let tx = conn.transaction()?;
    let mut applied = 0;
    for migration in MIGRATIONS.iter().filter(|migration| migration.version > found) {
        tx.execute_batch(migration.sql)
            .and_then(|()| tx.pragma_update(None, "user_version", migration.version))
            .map_err(|source| DbError::Migration {
                version: migration.version,
                name: migration.name,
                source,
            })?;
        debug!(
            "event=db_migrate module=db status=step version={} name={}",
            migration.version, migration.name
        );
        applied += 1;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from={found} to={SCHEMA_VERSION} applied={applied}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::MIGRATIONS;

    #[test]
    fn versions_increase_by_one() {
        for (index, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version as usize, index + 1, "{}", migration.name);
        }
    }
}
