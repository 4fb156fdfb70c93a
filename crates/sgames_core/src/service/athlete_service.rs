//! Athlete use-case service.
//!
//! # Responsibility
//! - Provide the command/query entry points for athletes.
//! - Translate "row absent" reads into `NotFound` for point lookups while
//!   keeping empty listings a plain empty vector.
//!
//! # Invariants
//! - Conflicting writes are surfaced, never retried here.
//! - An empty filter result is a valid empty list, not an error.

use crate::model::athlete::{AthleteId, AthleteInput, AthleteRecord};
use crate::model::audit::{Principal, VersionToken};
use crate::model::contingent::ContingentId;
use crate::model::sport::SportId;
use crate::repo::athlete_repo::{AthleteFilter, AthleteRepository};
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};

/// Use-case service wrapper for athlete operations.
pub struct AthleteService<R: AthleteRepository> {
    repo: R,
}

impl<R: AthleteRepository> AthleteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one athlete on behalf of `principal`.
    pub fn create_athlete(
        &mut self,
        input: &AthleteInput,
        principal: &Principal,
    ) -> RepoResult<AthleteRecord> {
        match self.repo.create_athlete(input, principal) {
            Ok(record) => {
                info!(
                    "event=athlete_create module=service status=ok id={} code={}",
                    record.id, record.athlete_code
                );
                Ok(record)
            }
            Err(err) => {
                warn!("event=athlete_create module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Full-record replace guarded by the previously read version token.
    pub fn update_athlete(
        &mut self,
        id: AthleteId,
        input: &AthleteInput,
        expected: &VersionToken,
        principal: &Principal,
    ) -> RepoResult<AthleteRecord> {
        match self.repo.update_athlete(id, input, expected, principal) {
            Ok(record) => {
                info!("event=athlete_update module=service status=ok id={id}");
                Ok(record)
            }
            Err(err) => {
                warn!("event=athlete_update module=service status=error id={id} error={err}");
                Err(err)
            }
        }
    }

    /// Gets one athlete by id; absent rows become `NotFound`.
    pub fn get_athlete(&self, id: AthleteId) -> RepoResult<AthleteRecord> {
        self.repo
            .get_athlete(id)?
            .ok_or(RepoError::NotFound(id))
    }

    /// Lists athletes matching the optional parent filters.
    pub fn list_athletes(&self, filter: &AthleteFilter) -> RepoResult<Vec<AthleteRecord>> {
        self.repo.list_athletes(filter)
    }

    /// Lists the athletes competing in one sport.
    pub fn athletes_by_sport(&self, sport_id: SportId) -> RepoResult<Vec<AthleteRecord>> {
        self.repo.list_athletes(&AthleteFilter::by_sport(sport_id))
    }

    /// Lists the athletes belonging to one contingent.
    pub fn athletes_by_contingent(
        &self,
        contingent_id: ContingentId,
    ) -> RepoResult<Vec<AthleteRecord>> {
        self.repo
            .list_athletes(&AthleteFilter::by_contingent(contingent_id))
    }

    /// Deletes one athlete guarded by the previously read version token.
    pub fn delete_athlete(&mut self, id: AthleteId, expected: &VersionToken) -> RepoResult<()> {
        match self.repo.delete_athlete(id, expected) {
            Ok(()) => {
                info!("event=athlete_delete module=service status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                warn!("event=athlete_delete module=service status=error id={id} error={err}");
                Err(err)
            }
        }
    }
}
