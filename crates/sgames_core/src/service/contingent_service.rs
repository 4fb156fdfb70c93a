//! Contingent use-case service.

use crate::model::contingent::{ContingentId, ContingentInput, ContingentRecord};
use crate::repo::contingent_repo::ContingentRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};

/// Use-case service wrapper for contingent operations.
pub struct ContingentService<R: ContingentRepository> {
    repo: R,
}

impl<R: ContingentRepository> ContingentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_contingent(&mut self, input: &ContingentInput) -> RepoResult<ContingentRecord> {
        match self.repo.create_contingent(input) {
            Ok(record) => {
                info!(
                    "event=contingent_create module=service status=ok id={} code={}",
                    record.id, record.code
                );
                Ok(record)
            }
            Err(err) => {
                warn!("event=contingent_create module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Gets one contingent by id; absent rows become `NotFound`.
    pub fn get_contingent(&self, id: ContingentId) -> RepoResult<ContingentRecord> {
        self.repo
            .get_contingent(id)?
            .ok_or(RepoError::NotFound(id))
    }

    pub fn list_contingents(&self) -> RepoResult<Vec<ContingentRecord>> {
        self.repo.list_contingents()
    }

    /// Deletes one contingent; blocked while athletes reference it.
    pub fn delete_contingent(&mut self, id: ContingentId) -> RepoResult<()> {
        match self.repo.delete_contingent(id) {
            Ok(()) => {
                info!("event=contingent_delete module=service status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                warn!("event=contingent_delete module=service status=error id={id} error={err}");
                Err(err)
            }
        }
    }
}
