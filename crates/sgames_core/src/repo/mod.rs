//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for the roster tables.
//! - Isolate SQL details from service/business orchestration.
//! - Translate store-level constraint failures into the semantic taxonomy
//!   (`DuplicateCode`, `ReferentialBlock`, `ConflictStale`, ...).
//!
//! # Invariants
//! - Every write runs inside one immediate transaction: validate, check
//!   parents, apply, stamp audit, commit.
//! - Token checks are compare-and-swap `UPDATE ... WHERE row_version = ?`
//!   statements, never read-then-write sequences.
//! - Repositories never retry a conflicting write; conflicts surface to the
//!   caller.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod athlete_repo;
pub mod contingent_repo;
pub mod sport_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Semantic error taxonomy for roster persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Input failed one or more validation rules; nothing was written.
    Validation(Vec<ValidationError>),
    /// Row does not exist.
    NotFound(i64),
    /// Row exists but its version token no longer matches the caller's.
    ConflictStale,
    /// Row vanished between the caller's read and this write.
    ConflictMissing,
    /// A unique code constraint rejected the write.
    DuplicateCode,
    /// Delete blocked because dependent athletes still reference the row.
    ReferentialBlock,
    /// Referenced parent row does not exist (named by FK field).
    MissingParent(&'static str),
    /// Store transport or schema failure.
    Db(DbError),
    /// Persisted row contents could not be interpreted.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => {
                write!(f, "validation failed: ")?;
                for (index, error) in errors.iter().enumerate() {
                    if index > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            }
            Self::NotFound(id) => write!(f, "row not found: {id}"),
            Self::ConflictStale => write!(
                f,
                "row was updated by another writer; reload and retry with the current token"
            ),
            Self::ConflictMissing => write!(f, "row was removed by another writer"),
            Self::DuplicateCode => write!(f, "duplicate code violates a unique constraint"),
            Self::ReferentialBlock => {
                write!(f, "delete blocked: athletes still reference this row")
            }
            Self::MissingParent(field) => {
                write!(f, "referenced {field} row does not exist")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted row data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match constraint_kind(&value) {
            Some(ConstraintKind::Unique) => Self::DuplicateCode,
            Some(ConstraintKind::ForeignKey) => Self::ReferentialBlock,
            None => Self::Db(DbError::Sqlite(value)),
        }
    }
}

enum ConstraintKind {
    Unique,
    ForeignKey,
}

fn constraint_kind(error: &rusqlite::Error) -> Option<ConstraintKind> {
    match error {
        rusqlite::Error::SqliteFailure(inner, _) => match inner.extended_code {
            rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Some(ConstraintKind::Unique),
            // SQLite reports ON DELETE RESTRICT violations through its
            // internal trigger machinery, so both codes mean a blocked FK.
            rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
            | rusqlite::ffi::SQLITE_CONSTRAINT_TRIGGER => Some(ConstraintKind::ForeignKey),
            _ => None,
        },
        _ => None,
    }
}
