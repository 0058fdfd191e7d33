use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use tracker_core::Entity;
use tracker_saga::Command;

use super::{Verb, step_name};
use crate::error::OperationError;
use crate::normalize::{fallback, normalize};
use crate::traits::Repository;

/// Replaces an entity with a new version; undo writes the old version back.
pub struct UpdateEntity<E: Entity> {
    repository: Arc<dyn Repository<E>>,
    before: E,
    after: E,
}

impl<E: Entity> UpdateEntity<E> {
    #[must_use]
    pub fn new(repository: Arc<dyn Repository<E>>, before: E, after: E) -> Self {
        Self {
            repository,
            before,
            after,
        }
    }
}

#[async_trait]
impl<E: Entity> Command for UpdateEntity<E> {
    type Error = OperationError;

    fn name(&self) -> &'static str {
        step_name(Verb::Update, E::ENTITY_TYPE)
    }

    async fn execute(&self) -> Result<(), OperationError> {
        normalize(
            fallback("update", E::ENTITY_TYPE),
            self.repository.update(&self.after),
        )
        .await?;
        debug!(entity = %E::ENTITY_TYPE, id = %self.after.id(), "updated entity");
        Ok(())
    }

    async fn undo(&self) -> Result<(), OperationError> {
        normalize(
            fallback("restore", E::ENTITY_TYPE),
            self.repository.update(&self.before),
        )
        .await
    }

    fn undo_description(&self) -> String {
        format!("restore previous {} '{}'", E::ENTITY_TYPE, self.before.id())
    }
}

#[cfg(test)]
mod tests {
    use tracker_core::Project;

    use super::*;
    use crate::mocks::FlakyRepository;

    #[tokio::test]
    async fn undo_writes_previous_version_back() -> anyhow::Result<()> {
        let before = Project::new("apollo");
        let after = Project {
            name: "artemis".to_string(),
            ..before.clone()
        };
        let repo = Arc::new(FlakyRepository::with_records([before.clone()]));
        let command = UpdateEntity::new(repo.clone(), before.clone(), after.clone());

        command.execute().await?;
        assert_eq!(repo.stored().await, vec![after]);

        command.undo().await?;
        assert_eq!(repo.stored().await, vec![before]);
        Ok(())
    }
}
