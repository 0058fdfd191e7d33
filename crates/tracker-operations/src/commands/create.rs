use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use tracker_core::Entity;
use tracker_saga::Command;

use super::{Verb, step_name};
use crate::error::OperationError;
use crate::normalize::{fallback, normalize};
use crate::traits::Repository;

/// Stores a new entity; undo removes it again.
pub struct CreateEntity<E: Entity> {
    repository: Arc<dyn Repository<E>>,
    entity: E,
}

impl<E: Entity> CreateEntity<E> {
    #[must_use]
    pub fn new(repository: Arc<dyn Repository<E>>, entity: E) -> Self {
        Self { repository, entity }
    }
}

#[async_trait]
impl<E: Entity> Command for CreateEntity<E> {
    type Error = OperationError;

    fn name(&self) -> &'static str {
        step_name(Verb::Create, E::ENTITY_TYPE)
    }

    async fn execute(&self) -> Result<(), OperationError> {
        normalize(
            fallback("create", E::ENTITY_TYPE),
            self.repository.create(&self.entity),
        )
        .await?;
        debug!(entity = %E::ENTITY_TYPE, id = %self.entity.id(), "stored new entity");
        Ok(())
    }

    async fn undo(&self) -> Result<(), OperationError> {
        normalize(
            fallback("remove", E::ENTITY_TYPE),
            self.repository.delete(self.entity.id()),
        )
        .await
    }

    fn undo_description(&self) -> String {
        format!("remove {} '{}'", E::ENTITY_TYPE, self.entity.id())
    }
}

#[cfg(test)]
mod tests {
    use tracker_core::{Project, ProjectId};

    use super::*;
    use crate::mocks::{FlakyRepository, RepoOp};
    use crate::storage::BackendErrorKind;

    #[tokio::test]
    async fn execute_stores_and_undo_removes() -> anyhow::Result<()> {
        let repo = Arc::new(FlakyRepository::<Project>::new());
        let project = Project::new("apollo");
        let command = CreateEntity::new(repo.clone(), project.clone());

        command.execute().await?;
        assert_eq!(repo.stored().await, vec![project.clone()]);

        command.undo().await?;
        assert!(repo.stored().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn backend_failure_is_normalized() {
        let repo = Arc::new(
            FlakyRepository::<Project>::new().fail_on(RepoOp::Create, BackendErrorKind::Timeout),
        );
        let command = CreateEntity::new(repo, Project::new("apollo"));

        let err = command.execute().await.expect_err("should fail");

        assert!(matches!(err, OperationError::DataBase(_)));
    }

    #[test]
    fn name_and_undo_description_mention_entity() {
        let repo: Arc<dyn Repository<Project>> = Arc::new(FlakyRepository::<Project>::new());
        let mut project = Project::new("apollo");
        project.id = ProjectId::new();
        let command = CreateEntity::new(repo, project.clone());

        assert_eq!(command.name(), "create_project");
        assert!(command.undo_description().contains(&project.id.to_string()));
    }
}
