use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use tracker_core::Entity;
use tracker_saga::Command;

use super::{Verb, step_name};
use crate::error::OperationError;
use crate::normalize::{fallback, normalize};
use crate::traits::Repository;

/// Removes an entity; undo stores it again.
///
/// Built from the already-fetched entity so undo can recreate it exactly.
pub struct DeleteEntity<E: Entity> {
    repository: Arc<dyn Repository<E>>,
    entity: E,
}

impl<E: Entity> DeleteEntity<E> {
    #[must_use]
    pub fn new(repository: Arc<dyn Repository<E>>, entity: E) -> Self {
        Self { repository, entity }
    }
}

#[async_trait]
impl<E: Entity> Command for DeleteEntity<E> {
    type Error = OperationError;

    fn name(&self) -> &'static str {
        step_name(Verb::Delete, E::ENTITY_TYPE)
    }

    async fn execute(&self) -> Result<(), OperationError> {
        normalize(
            fallback("delete", E::ENTITY_TYPE),
            self.repository.delete(self.entity.id()),
        )
        .await?;
        debug!(entity = %E::ENTITY_TYPE, id = %self.entity.id(), "deleted entity");
        Ok(())
    }

    async fn undo(&self) -> Result<(), OperationError> {
        normalize(
            fallback("restore", E::ENTITY_TYPE),
            self.repository.create(&self.entity),
        )
        .await
    }

    fn undo_description(&self) -> String {
        format!("restore {} '{}'", E::ENTITY_TYPE, self.entity.id())
    }
}
