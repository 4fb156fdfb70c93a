//! Result-to-status mapping for transport layers.
//!
//! # Responsibility
//! - Give HTTP (or other RPC) adapters one canonical mapping from the
//!   repository error taxonomy to response status codes.
//!
//! # Invariants
//! - Empty collections are successful responses, not errors; only the error
//!   taxonomy is mapped here.

use crate::repo::RepoError;

/// HTTP status code for a failed roster operation.
///
/// - 400: validation, duplicate code, missing parent reference
/// - 404: row not found
/// - 409: stale/missing concurrency token, referential block
/// - 500: store failure or corrupt persisted data
pub fn status_code(error: &RepoError) -> u16 {
    match error {
        RepoError::Validation(_) | RepoError::DuplicateCode | RepoError::MissingParent(_) => 400,
        RepoError::NotFound(_) => 404,
        RepoError::ConflictStale | RepoError::ConflictMissing | RepoError::ReferentialBlock => 409,
        RepoError::Db(_) | RepoError::InvalidData(_) => 500,
    }
}
