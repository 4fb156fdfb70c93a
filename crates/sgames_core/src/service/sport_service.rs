//! Sport use-case service.

use crate::model::audit::{Principal, VersionToken};
use crate::model::sport::{SportId, SportInput, SportRecord};
use crate::repo::sport_repo::SportRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};

/// Use-case service wrapper for sport operations.
pub struct SportService<R: SportRepository> {
    repo: R,
}

impl<R: SportRepository> SportService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_sport(
        &mut self,
        input: &SportInput,
        principal: &Principal,
    ) -> RepoResult<SportRecord> {
        match self.repo.create_sport(input, principal) {
            Ok(record) => {
                info!(
                    "event=sport_create module=service status=ok id={} code={}",
                    record.id, record.code
                );
                Ok(record)
            }
            Err(err) => {
                warn!("event=sport_create module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Gets one sport by id; absent rows become `NotFound`.
    pub fn get_sport(&self, id: SportId) -> RepoResult<SportRecord> {
        self.repo.get_sport(id)?.ok_or(RepoError::NotFound(id))
    }

    pub fn list_sports(&self) -> RepoResult<Vec<SportRecord>> {
        self.repo.list_sports()
    }

    /// Deletes one sport guarded by the previously read version token;
    /// blocked while athletes reference it.
    pub fn delete_sport(&mut self, id: SportId, expected: &VersionToken) -> RepoResult<()> {
        match self.repo.delete_sport(id, expected) {
            Ok(()) => {
                info!("event=sport_delete module=service status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                warn!("event=sport_delete module=service status=error id={id} error={err}");
                Err(err)
            }
        }
    }
}
