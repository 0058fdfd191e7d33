use std::sync::Arc;

use tracker_core::{AuditLog, Entity, Project, Task};

use crate::Result;
use crate::config::{AuthorizationPolicy, TrackerConfig};
use crate::error::OperationError;
use crate::normalize::{fallback, normalize};
use crate::traits::Repository;

/// Entry point for the tracker's use cases.
///
/// Holds the repository ports and the authorization policy. The backends
/// behind the ports can be swapped freely; callers only ever see
/// [`OperationError`].
pub struct Tracker {
    pub(super) tasks: Arc<dyn Repository<Task>>,
    pub(super) projects: Arc<dyn Repository<Project>>,
    pub(super) audit_logs: Arc<dyn Repository<AuditLog>>,
    pub(super) policy: AuthorizationPolicy,
}

impl Clone for Tracker {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            projects: Arc::clone(&self.projects),
            audit_logs: Arc::clone(&self.audit_logs),
            policy: self.policy.clone(),
        }
    }
}

impl Tracker {
    pub fn new(
        tasks: Arc<dyn Repository<Task>>,
        projects: Arc<dyn Repository<Project>>,
        audit_logs: Arc<dyn Repository<AuditLog>>,
    ) -> Self {
        Self {
            tasks,
            projects,
            audit_logs,
            policy: AuthorizationPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: &TrackerConfig) -> Self {
        self.policy = config.authorization().clone();
        self
    }

    #[must_use]
    pub fn policy(&self) -> &AuthorizationPolicy {
        &self.policy
    }

    pub(super) async fn fetch<E: Entity>(repository: &dyn Repository<E>, id: E::Id) -> Result<E> {
        normalize(fallback("read", E::ENTITY_TYPE), repository.get_by_id(id))
            .await?
            .ok_or_else(|| OperationError::not_found::<E>(id))
    }

    pub(super) async fn fetch_all<E: Entity>(repository: &dyn Repository<E>) -> Result<Vec<E>> {
        normalize(fallback("list", E::ENTITY_TYPE), repository.get_all()).await
    }
}
