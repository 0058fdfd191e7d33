use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use tracker_core::{AuditLog, EntityType};
use tracker_saga::Command;

use crate::error::OperationError;
use crate::normalize::{fallback, normalize};
use crate::traits::Repository;

/// Records an audit log entry; undo removes it.
pub struct WriteAuditLog {
    repository: Arc<dyn Repository<AuditLog>>,
    log: AuditLog,
}

impl WriteAuditLog {
    #[must_use]
    pub fn new(repository: Arc<dyn Repository<AuditLog>>, log: AuditLog) -> Self {
        Self { repository, log }
    }
}

#[async_trait]
impl Command for WriteAuditLog {
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "write_audit_log"
    }

    async fn execute(&self) -> Result<(), OperationError> {
        normalize(
            fallback("write", EntityType::AuditLog),
            self.repository.create(&self.log),
        )
        .await?;
        debug!(
            audit_log = %self.log.id,
            action_type = %self.log.action_type,
            entity_type = %self.log.entity_type,
            entity_id = %self.log.entity_id,
            "wrote audit log entry"
        );
        Ok(())
    }

    async fn undo(&self) -> Result<(), OperationError> {
        normalize(
            fallback("remove", EntityType::AuditLog),
            self.repository.delete(self.log.id),
        )
        .await
    }

    fn undo_description(&self) -> String {
        format!("remove audit log entry '{}'", self.log.id)
    }
}
