//! Athlete repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `athletes` table joined with parent
//!   summaries.
//! - Own the optimistic-concurrency write protocol for athletes.
//!
//! # Invariants
//! - Write paths validate input before any SQL mutation.
//! - `update`/`delete` are single compare-and-swap statements on
//!   `row_version`; a zero-row result is disambiguated by an existence probe
//!   inside the same transaction.
//! - Parent rows are checked inside the write transaction, so an insert can
//!   never race a parent delete.

use crate::model::athlete::{AthleteId, AthleteInput, AthleteRecord};
use crate::model::audit::{now_epoch_ms, AuditStamp, Principal, VersionToken};
use crate::model::contingent::{ContingentId, ContingentSummary};
use crate::model::sport::{SportId, SportSummary};
use crate::model::validation::validate_athlete;
use crate::repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};

const ATHLETE_SELECT_SQL: &str = "SELECT
    a.id AS id,
    a.first_name AS first_name,
    a.middle_name AS middle_name,
    a.last_name AS last_name,
    a.athlete_code AS athlete_code,
    a.dob AS dob,
    a.height_cm AS height_cm,
    a.weight_kg AS weight_kg,
    a.gender AS gender,
    a.affiliation AS affiliation,
    a.created_by AS created_by,
    a.created_on AS created_on,
    a.updated_by AS updated_by,
    a.updated_on AS updated_on,
    a.row_version AS row_version,
    c.id AS contingent_id,
    c.code AS contingent_code,
    c.name AS contingent_name,
    s.id AS sport_id,
    s.code AS sport_code,
    s.name AS sport_name
FROM athletes a
JOIN contingents c ON c.id = a.contingent_id
JOIN sports s ON s.id = a.sport_id";

/// Optional parent filters for athlete listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AthleteFilter {
    pub contingent_id: Option<ContingentId>,
    pub sport_id: Option<SportId>,
}

impl AthleteFilter {
    pub fn by_contingent(id: ContingentId) -> Self {
        Self {
            contingent_id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_sport(id: SportId) -> Self {
        Self {
            sport_id: Some(id),
            ..Self::default()
        }
    }
}

/// Repository interface for athlete CRUD operations.
pub trait AthleteRepository {
    /// Validates and inserts one athlete, returning the stored record with
    /// its freshly issued version token.
    fn create_athlete(
        &mut self,
        input: &AthleteInput,
        principal: &Principal,
    ) -> RepoResult<AthleteRecord>;

    /// Full-record replace guarded by the previously read version token.
    fn update_athlete(
        &mut self,
        id: AthleteId,
        input: &AthleteInput,
        expected: &VersionToken,
        principal: &Principal,
    ) -> RepoResult<AthleteRecord>;

    fn get_athlete(&self, id: AthleteId) -> RepoResult<Option<AthleteRecord>>;

    fn list_athletes(&self, filter: &AthleteFilter) -> RepoResult<Vec<AthleteRecord>>;

    /// Physical delete guarded by the previously read version token.
    fn delete_athlete(&mut self, id: AthleteId, expected: &VersionToken) -> RepoResult<()>;
}

/// SQLite-backed athlete repository.
pub struct SqliteAthleteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteAthleteRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl AthleteRepository for SqliteAthleteRepository<'_> {
    fn create_athlete(
        &mut self,
        input: &AthleteInput,
        principal: &Principal,
    ) -> RepoResult<AthleteRecord> {
        let errors = validate_athlete(input);
        if !errors.is_empty() {
            return Err(RepoError::Validation(errors));
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_parents_exist(&tx, input.contingent_id, input.sport_id)?;

        let stamp = AuditStamp::on_create(principal);
        let token = VersionToken::generate();

        tx.execute(
            "INSERT INTO athletes (
                first_name,
                middle_name,
                last_name,
                athlete_code,
                dob,
                height_cm,
                weight_kg,
                gender,
                affiliation,
                contingent_id,
                sport_id,
                created_by,
                created_on,
                updated_by,
                updated_on,
                row_version
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16);",
            params![
                input.first_name.as_str(),
                input.middle_name.as_deref(),
                input.last_name.as_str(),
                input.athlete_code.as_str(),
                input.dob.as_str(),
                input.height_cm,
                input.weight_kg,
                input.gender.as_str(),
                input.affiliation.as_str(),
                input.contingent_id,
                input.sport_id,
                stamp.created_by.as_str(),
                stamp.created_on,
                stamp.updated_by.as_str(),
                stamp.updated_on,
                token.as_str(),
            ],
        )?;

        let id = tx.last_insert_rowid();
        let record = load_athlete(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("athlete {id} missing immediately after insert"))
        })?;
        tx.commit()?;

        Ok(record)
    }

    fn update_athlete(
        &mut self,
        id: AthleteId,
        input: &AthleteInput,
        expected: &VersionToken,
        principal: &Principal,
    ) -> RepoResult<AthleteRecord> {
        let errors = validate_athlete(input);
        if !errors.is_empty() {
            return Err(RepoError::Validation(errors));
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_parents_exist(&tx, input.contingent_id, input.sport_id)?;

        let token = VersionToken::generate();
        let updated_on = now_epoch_ms();

        // Compare-and-swap: the WHERE clause carries the caller's token, so
        // a concurrent writer that already advanced the row makes this a
        // zero-row update.
        let changed = tx.execute(
            "UPDATE athletes
             SET
                first_name = ?1,
                middle_name = ?2,
                last_name = ?3,
                athlete_code = ?4,
                dob = ?5,
                height_cm = ?6,
                weight_kg = ?7,
                gender = ?8,
                affiliation = ?9,
                contingent_id = ?10,
                sport_id = ?11,
                updated_by = ?12,
                updated_on = ?13,
                row_version = ?14
             WHERE id = ?15
               AND row_version = ?16;",
            params![
                input.first_name.as_str(),
                input.middle_name.as_deref(),
                input.last_name.as_str(),
                input.athlete_code.as_str(),
                input.dob.as_str(),
                input.height_cm,
                input.weight_kg,
                input.gender.as_str(),
                input.affiliation.as_str(),
                input.contingent_id,
                input.sport_id,
                principal.as_str(),
                updated_on,
                token.as_str(),
                id,
                expected.as_str(),
            ],
        )?;

        if changed == 0 {
            return if athlete_exists(&tx, id)? {
                Err(RepoError::ConflictStale)
            } else {
                Err(RepoError::ConflictMissing)
            };
        }

        let record = load_athlete(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("athlete {id} missing immediately after update"))
        })?;
        tx.commit()?;

        Ok(record)
    }

    fn get_athlete(&self, id: AthleteId) -> RepoResult<Option<AthleteRecord>> {
        load_athlete(self.conn, id)
    }

    fn list_athletes(&self, filter: &AthleteFilter) -> RepoResult<Vec<AthleteRecord>> {
        let mut sql = format!("{ATHLETE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(contingent_id) = filter.contingent_id {
            sql.push_str(" AND a.contingent_id = ?");
            bind_values.push(Value::Integer(contingent_id));
        }

        if let Some(sport_id) = filter.sport_id {
            sql.push_str(" AND a.sport_id = ?");
            bind_values.push(Value::Integer(sport_id));
        }

        sql.push_str(" ORDER BY a.last_name ASC, a.first_name ASC, a.id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut athletes = Vec::new();

        while let Some(row) = rows.next()? {
            athletes.push(parse_athlete_row(row)?);
        }

        Ok(athletes)
    }

    fn delete_athlete(&mut self, id: AthleteId, expected: &VersionToken) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let changed = tx.execute(
            "DELETE FROM athletes WHERE id = ?1 AND row_version = ?2;",
            params![id, expected.as_str()],
        )?;

        if changed == 0 {
            return if athlete_exists(&tx, id)? {
                Err(RepoError::ConflictStale)
            } else {
                Err(RepoError::NotFound(id))
            };
        }

        tx.commit()?;
        Ok(())
    }
}

fn ensure_parents_exist(
    conn: &Connection,
    contingent_id: ContingentId,
    sport_id: SportId,
) -> RepoResult<()> {
    let contingent_exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM contingents WHERE id = ?1);",
        [contingent_id],
        |row| row.get(0),
    )?;
    if contingent_exists == 0 {
        return Err(RepoError::MissingParent("contingent_id"));
    }

    let sport_exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sports WHERE id = ?1);",
        [sport_id],
        |row| row.get(0),
    )?;
    if sport_exists == 0 {
        return Err(RepoError::MissingParent("sport_id"));
    }

    Ok(())
}

fn athlete_exists(conn: &Connection, id: AthleteId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM athletes WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn load_athlete(conn: &Connection, id: AthleteId) -> RepoResult<Option<AthleteRecord>> {
    let mut stmt = conn.prepare(&format!("{ATHLETE_SELECT_SQL} WHERE a.id = ?1;"))?;
    let mut rows = stmt.query([id])?;

    if let Some(row) = rows.next()? {
        return Ok(Some(parse_athlete_row(row)?));
    }

    Ok(None)
}

fn parse_athlete_row(row: &Row<'_>) -> RepoResult<AthleteRecord> {
    let gender: String = row.get("gender")?;
    if gender != "M" && gender != "W" {
        return Err(RepoError::InvalidData(format!(
            "invalid gender value `{gender}` in athletes.gender"
        )));
    }

    let token_text: String = row.get("row_version")?;
    if token_text.is_empty() {
        return Err(RepoError::InvalidData(
            "empty row_version in athletes.row_version".to_string(),
        ));
    }

    Ok(AthleteRecord {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        middle_name: row.get("middle_name")?,
        last_name: row.get("last_name")?,
        athlete_code: row.get("athlete_code")?,
        dob: row.get("dob")?,
        height_cm: row.get("height_cm")?,
        weight_kg: row.get("weight_kg")?,
        gender,
        affiliation: row.get("affiliation")?,
        contingent: ContingentSummary {
            id: row.get("contingent_id")?,
            code: row.get("contingent_code")?,
            name: row.get("contingent_name")?,
        },
        sport: SportSummary {
            id: row.get("sport_id")?,
            code: row.get("sport_code")?,
            name: row.get("sport_name")?,
        },
        audit: AuditStamp {
            created_by: row.get("created_by")?,
            created_on: row.get("created_on")?,
            updated_by: row.get("updated_by")?,
            updated_on: row.get("updated_on")?,
        },
        row_version: VersionToken::from_stored(token_text),
    })
}
