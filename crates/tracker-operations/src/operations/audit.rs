use std::sync::Arc;

use tracing::debug;
use tracker_core::{AuditLog, AuditLogId, EntityType};
use tracker_saga::TransactionBuilder;

use super::tracker::Tracker;
use crate::Result;
use crate::authorization::authorize;
use crate::commands::DeleteEntity;
use crate::error::UseCaseFailure;
use crate::session::Session;

impl Tracker {
    /// All audit log entries, oldest first.
    ///
    /// # Errors
    ///
    /// Fails with an authorization error or a normalized storage error.
    pub async fn list_audit_logs(&self, session: &Session) -> Result<Vec<AuditLog>> {
        authorize(session, self.policy.manage_audit_logs(), |_| async move {
            let mut logs = Self::fetch_all(self.audit_logs.as_ref()).await?;
            logs.sort_by_key(|log| log.timestamp);
            Ok(logs)
        })
        .await
    }

    /// Audit log entries describing one entity, oldest first.
    ///
    /// # Errors
    ///
    /// Fails with an authorization error, `InvalidId` if `entity_id` is not an
    /// id of `entity_type`, or a normalized storage error.
    pub async fn entity_history(
        &self,
        session: &Session,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<Vec<AuditLog>> {
        let logs = self.list_audit_logs(session).await?;
        let entity_id = entity_type.canonical_id(entity_id)?;
        Ok(logs
            .into_iter()
            .filter(|log| log.entity_type == entity_type && log.entity_id == entity_id)
            .collect())
    }

    /// Remove one audit log entry. The removal itself is not audited.
    ///
    /// # Errors
    ///
    /// Fails with an authorization error, `InvalidId`, `NotFound`, or
    /// `UnableToDeleteAuditLog`.
    pub async fn delete_audit_log(&self, session: &Session, log_id: &str) -> Result<AuditLog> {
        authorize(session, self.policy.manage_audit_logs(), |actor| async move {
            let id: AuditLogId = log_id.parse()?;
            let log = Self::fetch(self.audit_logs.as_ref(), id).await?;

            TransactionBuilder::new()
                .then(DeleteEntity::new(Arc::clone(&self.audit_logs), log.clone()))
                .build(UseCaseFailure::UnableToDeleteAuditLog)
                .run()
                .await?;

            debug!(audit_log = %id, user = %actor.username, "deleted audit log entry");
            Ok(log)
        })
        .await
    }
}
