//! Sport repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide reads over `sports` with dependent-athlete counts.
//! - Provide token-guarded create/delete following the athlete write
//!   protocol, since sports carry audit columns and a version token.
//!
//! # Invariants
//! - Delete is a compare-and-swap on `row_version`; restrict-delete blocks
//!   removal while athletes reference the row.

use crate::model::audit::{AuditStamp, Principal, VersionToken};
use crate::model::sport::{SportId, SportInput, SportRecord};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row, TransactionBehavior};

const SPORT_SELECT_SQL: &str = "SELECT
    s.id AS id,
    s.code AS code,
    s.name AS name,
    (SELECT COUNT(*) FROM athletes a WHERE a.sport_id = s.id) AS athlete_count,
    s.created_by AS created_by,
    s.created_on AS created_on,
    s.updated_by AS updated_by,
    s.updated_on AS updated_on,
    s.row_version AS row_version
FROM sports s";

/// Repository interface for sport operations.
pub trait SportRepository {
    fn create_sport(&mut self, input: &SportInput, principal: &Principal)
        -> RepoResult<SportRecord>;
    fn get_sport(&self, id: SportId) -> RepoResult<Option<SportRecord>>;
    fn list_sports(&self) -> RepoResult<Vec<SportRecord>>;
    /// Physical delete guarded by the previously read version token;
    /// blocked while any athlete references the row.
    fn delete_sport(&mut self, id: SportId, expected: &VersionToken) -> RepoResult<()>;
}

/// SQLite-backed sport repository.
pub struct SqliteSportRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteSportRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl SportRepository for SqliteSportRepository<'_> {
    fn create_sport(
        &mut self,
        input: &SportInput,
        principal: &Principal,
    ) -> RepoResult<SportRecord> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let stamp = AuditStamp::on_create(principal);
        let token = VersionToken::generate();

        tx.execute(
            "INSERT INTO sports (
                code,
                name,
                created_by,
                created_on,
                updated_by,
                updated_on,
                row_version
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                input.code.as_str(),
                input.name.as_str(),
                stamp.created_by.as_str(),
                stamp.created_on,
                stamp.updated_by.as_str(),
                stamp.updated_on,
                token.as_str(),
            ],
        )?;

        let id = tx.last_insert_rowid();
        let record = load_sport(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("sport {id} missing immediately after insert"))
        })?;
        tx.commit()?;

        Ok(record)
    }

    fn get_sport(&self, id: SportId) -> RepoResult<Option<SportRecord>> {
        load_sport(self.conn, id)
    }

    fn list_sports(&self) -> RepoResult<Vec<SportRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SPORT_SELECT_SQL} ORDER BY s.code ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut sports = Vec::new();

        while let Some(row) = rows.next()? {
            sports.push(parse_sport_row(row)?);
        }

        Ok(sports)
    }

    fn delete_sport(&mut self, id: SportId, expected: &VersionToken) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        // FK restrict surfaces here as ReferentialBlock when athletes still
        // reference the row.
        let changed = tx.execute(
            "DELETE FROM sports WHERE id = ?1 AND row_version = ?2;",
            params![id, expected.as_str()],
        )?;

        if changed == 0 {
            return if sport_exists(&tx, id)? {
                Err(RepoError::ConflictStale)
            } else {
                Err(RepoError::NotFound(id))
            };
        }

        tx.commit()?;
        Ok(())
    }
}

fn sport_exists(conn: &Connection, id: SportId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sports WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn load_sport(conn: &Connection, id: SportId) -> RepoResult<Option<SportRecord>> {
    let mut stmt = conn.prepare(&format!("{SPORT_SELECT_SQL} WHERE s.id = ?1;"))?;
    let mut rows = stmt.query([id])?;

    if let Some(row) = rows.next()? {
        return Ok(Some(parse_sport_row(row)?));
    }

    Ok(None)
}

fn parse_sport_row(row: &Row<'_>) -> RepoResult<SportRecord> {
    let token_text: String = row.get("row_version")?;
    if token_text.is_empty() {
        return Err(RepoError::InvalidData(
            "empty row_version in sports.row_version".to_string(),
        ));
    }

    Ok(SportRecord {
        id: row.get("id")?,
        code: row.get("code")?,
        name: row.get("name")?,
        athlete_count: row.get("athlete_count")?,
        audit: AuditStamp {
            created_by: row.get("created_by")?,
            created_on: row.get("created_on")?,
            updated_by: row.get("updated_by")?,
            updated_on: row.get("updated_on")?,
        },
        row_version: VersionToken::from_stored(token_text),
    })
}
