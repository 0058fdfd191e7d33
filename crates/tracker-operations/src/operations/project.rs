use std::sync::Arc;

use tracing::debug;
use tracker_core::{ActionType, AuditLog, Project, ProjectId};
use tracker_saga::TransactionBuilder;

use super::require_non_empty;
use super::tracker::Tracker;
use crate::Result;
use crate::authorization::authorize;
use crate::commands::{CreateEntity, DeleteEntity, UpdateEntity, WriteAuditLog};
use crate::error::UseCaseFailure;
use crate::session::Session;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProjectChanges {
    fn apply(self, mut project: Project) -> Result<Project> {
        if let Some(name) = self.name {
            project.name = require_non_empty("name", &name)?;
        }
        if let Some(description) = self.description {
            project.description = description.trim().to_string();
        }
        Ok(project)
    }
}

impl Tracker {
    /// # Errors
    ///
    /// Fails with an authorization error, `InvalidInput` for a blank name, or
    /// `UnableToCreateProject` if storing the project or its audit entry fails.
    pub async fn create_project(&self, session: &Session, input: NewProject) -> Result<Project> {
        authorize(session, self.policy.manage_projects(), |actor| async move {
            let mut project = Project::new(require_non_empty("name", &input.name)?);
            project.description = input.description.trim().to_string();
            let log = AuditLog::record(
                actor.id,
                ActionType::Create,
                &project,
                format!("created project '{}'", project.name),
            );

            TransactionBuilder::new()
                .then(WriteAuditLog::new(Arc::clone(&self.audit_logs), log))
                .then(CreateEntity::new(
                    Arc::clone(&self.projects),
                    project.clone(),
                ))
                .build(UseCaseFailure::UnableToCreateProject)
                .run()
                .await?;

            debug!(project = %project.id, user = %actor.username, "created project");
            Ok(project)
        })
        .await
    }

    /// # Errors
    ///
    /// Fails with an authorization error, `InvalidId`/`InvalidInput` for bad
    /// input, `NotFound` if the project does not exist, or
    /// `UnableToUpdateProject`.
    pub async fn update_project(
        &self,
        session: &Session,
        project_id: &str,
        changes: ProjectChanges,
    ) -> Result<Project> {
        authorize(session, self.policy.manage_projects(), |actor| async move {
            let id: ProjectId = project_id.parse()?;
            let before = Self::fetch(self.projects.as_ref(), id).await?;
            let after = changes.apply(before.clone())?;
            let log = AuditLog::record(
                actor.id,
                ActionType::Update,
                &after,
                format!("updated project '{}'", after.name),
            );

            TransactionBuilder::new()
                .then(WriteAuditLog::new(Arc::clone(&self.audit_logs), log))
                .then(UpdateEntity::new(
                    Arc::clone(&self.projects),
                    before,
                    after.clone(),
                ))
                .build(UseCaseFailure::UnableToUpdateProject)
                .run()
                .await?;

            debug!(project = %id, user = %actor.username, "updated project");
            Ok(after)
        })
        .await
    }

    /// Delete a project and return what was deleted.
    ///
    /// Tasks of the project are left in place.
    ///
    /// # Errors
    ///
    /// Fails with an authorization error, `InvalidId`, `NotFound`, or
    /// `UnableToDeleteProject`.
    pub async fn delete_project(&self, session: &Session, project_id: &str) -> Result<Project> {
        authorize(session, self.policy.manage_projects(), |actor| async move {
            let id: ProjectId = project_id.parse()?;
            let project = Self::fetch(self.projects.as_ref(), id).await?;
            let log = AuditLog::record(
                actor.id,
                ActionType::Delete,
                &project,
                format!("deleted project '{}'", project.name),
            );

            TransactionBuilder::new()
                .then(WriteAuditLog::new(Arc::clone(&self.audit_logs), log))
                .then(DeleteEntity::new(
                    Arc::clone(&self.projects),
                    project.clone(),
                ))
                .build(UseCaseFailure::UnableToDeleteProject)
                .run()
                .await?;

            debug!(project = %id, user = %actor.username, "deleted project");
            Ok(project)
        })
        .await
    }

    /// # Errors
    ///
    /// Fails with an authorization error, `InvalidId`, `NotFound`, or a
    /// normalized storage error.
    pub async fn get_project(&self, session: &Session, project_id: &str) -> Result<Project> {
        authorize(session, self.policy.read(), |_| async move {
            let id: ProjectId = project_id.parse()?;
            Self::fetch(self.projects.as_ref(), id).await
        })
        .await
    }

    /// # Errors
    ///
    /// Fails with an authorization error or a normalized storage error.
    pub async fn list_projects(&self, session: &Session) -> Result<Vec<Project>> {
        authorize(session, self.policy.read(), |_| async move {
            Self::fetch_all(self.projects.as_ref()).await
        })
        .await
    }
}
