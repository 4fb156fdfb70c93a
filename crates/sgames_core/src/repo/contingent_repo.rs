//! Contingent repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide reads over `contingents` with dependent-athlete counts.
//! - Provide create/delete so the parent side of the roster can be managed
//!   with the same shapes as athletes.
//!
//! # Invariants
//! - Deletes rely on the restrict-delete foreign key: a contingent with
//!   athletes is never removed.

use crate::model::contingent::{ContingentId, ContingentInput, ContingentRecord};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row, TransactionBehavior};

const CONTINGENT_SELECT_SQL: &str = "SELECT
    c.id AS id,
    c.code AS code,
    c.name AS name,
    (SELECT COUNT(*) FROM athletes a WHERE a.contingent_id = c.id) AS athlete_count
FROM contingents c";

/// Repository interface for contingent operations.
pub trait ContingentRepository {
    fn create_contingent(&mut self, input: &ContingentInput) -> RepoResult<ContingentRecord>;
    fn get_contingent(&self, id: ContingentId) -> RepoResult<Option<ContingentRecord>>;
    fn list_contingents(&self) -> RepoResult<Vec<ContingentRecord>>;
    /// Physical delete; blocked while any athlete references the row.
    fn delete_contingent(&mut self, id: ContingentId) -> RepoResult<()>;
}

/// SQLite-backed contingent repository.
pub struct SqliteContingentRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteContingentRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl ContingentRepository for SqliteContingentRepository<'_> {
    fn create_contingent(&mut self, input: &ContingentInput) -> RepoResult<ContingentRecord> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO contingents (code, name) VALUES (?1, ?2);",
            params![input.code.as_str(), input.name.as_str()],
        )?;
        let id = tx.last_insert_rowid();
        let record = load_contingent(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("contingent {id} missing immediately after insert"))
        })?;
        tx.commit()?;

        Ok(record)
    }

    fn get_contingent(&self, id: ContingentId) -> RepoResult<Option<ContingentRecord>> {
        load_contingent(self.conn, id)
    }

    fn list_contingents(&self) -> RepoResult<Vec<ContingentRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTINGENT_SELECT_SQL} ORDER BY c.code ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contingents = Vec::new();

        while let Some(row) = rows.next()? {
            contingents.push(parse_contingent_row(row)?);
        }

        Ok(contingents)
    }

    fn delete_contingent(&mut self, id: ContingentId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        // FK restrict surfaces here as ReferentialBlock when athletes still
        // reference the row.
        let changed = tx.execute("DELETE FROM contingents WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        tx.commit()?;
        Ok(())
    }
}

fn load_contingent(conn: &Connection, id: ContingentId) -> RepoResult<Option<ContingentRecord>> {
    let mut stmt = conn.prepare(&format!("{CONTINGENT_SELECT_SQL} WHERE c.id = ?1;"))?;
    let mut rows = stmt.query([id])?;

    if let Some(row) = rows.next()? {
        return Ok(Some(parse_contingent_row(row)?));
    }

    Ok(None)
}

fn parse_contingent_row(row: &Row<'_>) -> RepoResult<ContingentRecord> {
    Ok(ContingentRecord {
        id: row.get("id")?,
        code: row.get("code")?,
        name: row.get("name")?,
        athlete_count: row.get("athlete_count")?,
    })
}
