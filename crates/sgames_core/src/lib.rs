//! Core domain logic for the Summer Games roster.
//! This crate is the single source of truth for business invariants:
//! athlete validation, optimistic-concurrency tokens, audit stamping and
//! restrict-delete relationships.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod transport;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::athlete::{AthleteId, AthleteInput, AthleteRecord};
pub use model::audit::{AuditStamp, Principal, VersionToken};
pub use model::contingent::{ContingentId, ContingentInput, ContingentRecord, ContingentSummary};
pub use model::sport::{SportId, SportInput, SportRecord, SportSummary};
pub use model::validation::{validate_athlete, AthleteField, RuleViolation, ValidationError};
pub use repo::athlete_repo::{AthleteFilter, AthleteRepository, SqliteAthleteRepository};
pub use repo::contingent_repo::{ContingentRepository, SqliteContingentRepository};
pub use repo::sport_repo::{SportRepository, SqliteSportRepository};
pub use repo::{RepoError, RepoResult};
pub use service::athlete_service::AthleteService;
pub use service::contingent_service::ContingentService;
pub use service::sport_service::SportService;
pub use transport::status_code;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
