use std::sync::Arc;

use tracing::debug;
use tracker_core::{ActionType, AuditLog, ProjectId, Task, TaskId, TaskStatus, UserId};
use tracker_saga::TransactionBuilder;

use super::require_non_empty;
use super::tracker::Tracker;
use crate::Result;
use crate::authorization::authorize;
use crate::commands::{CreateEntity, DeleteEntity, UpdateEntity, WriteAuditLog};
use crate::error::UseCaseFailure;
use crate::session::Session;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub project_id: String,
    pub title: String,
    pub description: String,
}

/// Fields to change on a task; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    /// `Some(None)` unassigns the task.
    pub assignee: Option<Option<UserId>>,
}

impl TaskChanges {
    fn apply(self, mut task: Task) -> Result<Task> {
        if let Some(title) = self.title {
            task.title = require_non_empty("title", &title)?;
        }
        if let Some(description) = self.description {
            task.description = description.trim().to_string();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(assignee) = self.assignee {
            task.assignee = assignee;
        }
        Ok(task)
    }
}

impl Tracker {
    /// Create a task in an existing project.
    ///
    /// # Errors
    ///
    /// Fails with an authorization error, `InvalidId`/`InvalidInput` for bad
    /// input, `NotFound` if the project does not exist, or
    /// `UnableToCreateTask` if storing the task or its audit entry fails.
    pub async fn create_task(&self, session: &Session, input: NewTask) -> Result<Task> {
        authorize(session, self.policy.manage_tasks(), |actor| async move {
            let project_id: ProjectId = input.project_id.parse()?;
            let title = require_non_empty("title", &input.title)?;
            Self::fetch(self.projects.as_ref(), project_id).await?;

            let mut task = Task::new(project_id, title);
            task.description = input.description.trim().to_string();
            let log = AuditLog::record(
                actor.id,
                ActionType::Create,
                &task,
                format!("created task '{}'", task.title),
            );

            TransactionBuilder::new()
                .then(WriteAuditLog::new(Arc::clone(&self.audit_logs), log))
                .then(CreateEntity::new(Arc::clone(&self.tasks), task.clone()))
                .build(UseCaseFailure::UnableToCreateTask)
                .run()
                .await?;

            debug!(task = %task.id, project = %project_id, user = %actor.username, "created task");
            Ok(task)
        })
        .await
    }

    /// Apply `changes` to a task and return the updated task.
    ///
    /// # Errors
    ///
    /// Fails with an authorization error, `InvalidId`/`InvalidInput` for bad
    /// input, `NotFound` if the task does not exist, or `UnableToUpdateTask`.
    pub async fn update_task(
        &self,
        session: &Session,
        task_id: &str,
        changes: TaskChanges,
    ) -> Result<Task> {
        authorize(session, self.policy.manage_tasks(), |actor| async move {
            let id: TaskId = task_id.parse()?;
            let before = Self::fetch(self.tasks.as_ref(), id).await?;
            let after = changes.apply(before.clone())?;
            let log = AuditLog::record(
                actor.id,
                ActionType::Update,
                &after,
                format!("updated task '{}'", after.title),
            );

            TransactionBuilder::new()
                .then(WriteAuditLog::new(Arc::clone(&self.audit_logs), log))
                .then(UpdateEntity::new(
                    Arc::clone(&self.tasks),
                    before,
                    after.clone(),
                ))
                .build(UseCaseFailure::UnableToUpdateTask)
                .run()
                .await?;

            debug!(task = %id, user = %actor.username, "updated task");
            Ok(after)
        })
        .await
    }

    /// Delete a task and return what was deleted.
    ///
    /// # Errors
    ///
    /// Fails with an authorization error, `InvalidId` for a malformed id,
    /// `NotFound` if the task does not exist, or `UnableToDeleteTask`.
    pub async fn delete_task(&self, session: &Session, task_id: &str) -> Result<Task> {
        authorize(session, self.policy.manage_tasks(), |actor| async move {
            let id: TaskId = task_id.parse()?;
            let task = Self::fetch(self.tasks.as_ref(), id).await?;
            let log = AuditLog::record(
                actor.id,
                ActionType::Delete,
                &task,
                format!("deleted task '{}'", task.title),
            );

            TransactionBuilder::new()
                .then(WriteAuditLog::new(Arc::clone(&self.audit_logs), log))
                .then(DeleteEntity::new(Arc::clone(&self.tasks), task.clone()))
                .build(UseCaseFailure::UnableToDeleteTask)
                .run()
                .await?;

            debug!(task = %id, user = %actor.username, "deleted task");
            Ok(task)
        })
        .await
    }

    /// # Errors
    ///
    /// Fails with an authorization error, `InvalidId`, `NotFound`, or a
    /// normalized storage error.
    pub async fn get_task(&self, session: &Session, task_id: &str) -> Result<Task> {
        authorize(session, self.policy.read(), |_| async move {
            let id: TaskId = task_id.parse()?;
            Self::fetch(self.tasks.as_ref(), id).await
        })
        .await
    }

    /// # Errors
    ///
    /// Fails with an authorization error or a normalized storage error.
    pub async fn list_tasks(&self, session: &Session) -> Result<Vec<Task>> {
        authorize(session, self.policy.read(), |_| async move {
            Self::fetch_all(self.tasks.as_ref()).await
        })
        .await
    }

    /// Tasks belonging to one project.
    ///
    /// # Errors
    ///
    /// Fails with an authorization error, `InvalidId`, `NotFound` if the
    /// project does not exist, or a normalized storage error.
    pub async fn list_project_tasks(
        &self,
        session: &Session,
        project_id: &str,
    ) -> Result<Vec<Task>> {
        authorize(session, self.policy.read(), |_| async move {
            let id: ProjectId = project_id.parse()?;
            Self::fetch(self.projects.as_ref(), id).await?;
            let tasks = Self::fetch_all(self.tasks.as_ref()).await?;
            Ok(tasks.into_iter().filter(|t| t.project_id == id).collect())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use tracker_core::{Project, Role};

    use super::*;
    use crate::error::OperationError;
    use crate::mocks::{FlakyRepository, RepoOp, session_for};
    use crate::storage::BackendErrorKind;
    use crate::traits::Repository;

    struct Fixture {
        tasks: Arc<FlakyRepository<Task>>,
        projects: Arc<FlakyRepository<Project>>,
        audit_logs: Arc<FlakyRepository<AuditLog>>,
        project: Project,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_repos(FlakyRepository::new(), FlakyRepository::new())
        }

        fn with_repos(tasks: FlakyRepository<Task>, audit_logs: FlakyRepository<AuditLog>) -> Self {
            let project = Project::new("apollo");
            Self {
                tasks: Arc::new(tasks),
                projects: Arc::new(FlakyRepository::with_records([project.clone()])),
                audit_logs: Arc::new(audit_logs),
                project,
            }
        }

        fn tracker(&self) -> Tracker {
            Tracker::new(
                self.tasks.clone(),
                self.projects.clone(),
                self.audit_logs.clone(),
            )
        }

        fn new_task(&self, title: &str) -> NewTask {
            NewTask {
                project_id: self.project.id.to_string(),
                title: title.to_string(),
                description: String::new(),
            }
        }
    }

    #[tokio::test]
    async fn create_task_stores_task_and_audit_entry() -> anyhow::Result<()> {
        let fixture = Fixture::new();
        let session = session_for(Role::Mate);

        let task = fixture
            .tracker()
            .create_task(&session, fixture.new_task("  launch "))
            .await?;

        assert_eq!(task.title, "launch");
        assert_eq!(fixture.tasks.stored().await, vec![task.clone()]);
        let logs = fixture.audit_logs.stored().await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action_type, ActionType::Create);
        assert!(logs[0].describes::<Task>(task.id));
        Ok(())
    }

    #[tokio::test]
    async fn create_task_in_unknown_project_touches_nothing() {
        let fixture = Fixture::new();
        let input = NewTask {
            project_id: ProjectId::new().to_string(),
            ..fixture.new_task("launch")
        };

        let err = fixture
            .tracker()
            .create_task(&session_for(Role::Admin), input)
            .await
            .expect_err("should fail");

        assert!(err.is_not_found());
        assert!(fixture.audit_logs.calls().is_empty());
        assert!(fixture.tasks.calls().is_empty());
    }

    #[tokio::test]
    async fn create_task_with_blank_title_is_invalid_input() {
        let fixture = Fixture::new();

        let err = fixture
            .tracker()
            .create_task(&session_for(Role::Admin), fixture.new_task("   "))
            .await
            .expect_err("should fail");

        assert!(matches!(
            err,
            OperationError::InvalidInput { field: "title", .. }
        ));
    }

    #[tokio::test]
    async fn failed_create_removes_audit_entry() {
        let fixture = Fixture::with_repos(
            FlakyRepository::new().fail_on(RepoOp::Create, BackendErrorKind::Connectivity),
            FlakyRepository::new(),
        );

        let err = fixture
            .tracker()
            .create_task(&session_for(Role::Admin), fixture.new_task("launch"))
            .await
            .expect_err("should fail");

        assert_eq!(
            err.use_case_failure(),
            Some(UseCaseFailure::UnableToCreateTask)
        );
        assert!(fixture.audit_logs.stored().await.is_empty());
        assert!(fixture.tasks.stored().await.is_empty());
    }

    #[tokio::test]
    async fn update_task_applies_changes_and_audits() -> anyhow::Result<()> {
        let fixture = Fixture::new();
        let session = session_for(Role::Mate);
        let tracker = fixture.tracker();
        let task = tracker
            .create_task(&session, fixture.new_task("launch"))
            .await?;

        let updated = tracker
            .update_task(
                &session,
                &task.id.to_string(),
                TaskChanges {
                    status: Some(TaskStatus::InProgress),
                    assignee: Some(Some(UserId::new())),
                    ..TaskChanges::default()
                },
            )
            .await?;

        assert_eq!(updated.status, TaskStatus::InProgress);
        assert!(updated.assignee.is_some());
        assert_eq!(updated.title, "launch");
        assert_eq!(fixture.tasks.stored().await, vec![updated]);
        let logs = fixture.audit_logs.stored().await;
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[1].action_type, ActionType::Update);
        Ok(())
    }

    #[tokio::test]
    async fn failed_update_keeps_task_and_removes_audit_entry() {
        let task = Task::new(ProjectId::new(), "launch");
        let fixture = Fixture::with_repos(
            FlakyRepository::with_records([task.clone()])
                .fail_on(RepoOp::Update, BackendErrorKind::Other),
            FlakyRepository::new(),
        );

        let err = fixture
            .tracker()
            .update_task(
                &session_for(Role::Mate),
                &task.id.to_string(),
                TaskChanges {
                    title: Some("land".to_string()),
                    ..TaskChanges::default()
                },
            )
            .await
            .expect_err("should fail");

        assert_eq!(
            err.use_case_failure(),
            Some(UseCaseFailure::UnableToUpdateTask)
        );
        assert_eq!(fixture.tasks.stored().await, vec![task]);
        assert!(fixture.audit_logs.stored().await.is_empty());
    }

    #[tokio::test]
    async fn failed_delete_with_failed_audit_undo_reports_both() {
        let task = Task::new(ProjectId::new(), "launch");
        let fixture = Fixture::with_repos(
            FlakyRepository::with_records([task.clone()])
                .fail_on(RepoOp::Delete, BackendErrorKind::Timeout),
            FlakyRepository::new().fail_on(RepoOp::Delete, BackendErrorKind::Connectivity),
        );

        let err = fixture
            .tracker()
            .delete_task(&session_for(Role::Admin), &task.id.to_string())
            .await
            .expect_err("should fail");

        assert_eq!(
            err.to_string(),
            "unable to delete task, and 1 rollback step(s) also failed"
        );
        let OperationError::RollbackIncomplete {
            failure,
            step,
            source,
            rollback_failures,
        } = &err
        else {
            panic!("expected an incomplete rollback, got {err:?}");
        };
        assert_eq!(*failure, UseCaseFailure::UnableToDeleteTask);
        assert_eq!(step, "delete_task");
        assert_eq!(source.to_string(), "storage backend is unavailable");
        assert_eq!(rollback_failures.len(), 1);
        assert_eq!(rollback_failures[0].step, "write_audit_log");
        assert!(matches!(*rollback_failures[0].error, OperationError::DataBase(_)));
        assert_eq!(fixture.audit_logs.stored().await.len(), 1);
        assert_eq!(fixture.tasks.stored().await, vec![task]);
    }

    #[tokio::test]
    async fn delete_task_with_malformed_id_fails_before_storage() {
        let fixture = Fixture::new();

        let err = fixture
            .tracker()
            .delete_task(&session_for(Role::Admin), "T1")
            .await
            .expect_err("should fail");

        assert!(matches!(err, OperationError::InvalidId(_)));
        assert!(fixture.tasks.calls().is_empty());
    }

    #[tokio::test]
    async fn list_project_tasks_filters_by_project() -> anyhow::Result<()> {
        let fixture = Fixture::new();
        let session = session_for(Role::Mate);
        let tracker = fixture.tracker();
        let ours = tracker
            .create_task(&session, fixture.new_task("ours"))
            .await?;
        fixture
            .tasks
            .create(&Task::new(ProjectId::new(), "theirs"))
            .await?;

        let tasks = tracker
            .list_project_tasks(&session, &fixture.project.id.to_string())
            .await?;

        assert_eq!(tasks, vec![ours]);
        assert_eq!(tracker.list_tasks(&session).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn get_task_normalizes_read_failures() {
        let task = Task::new(ProjectId::new(), "launch");
        let fixture = Fixture::with_repos(
            FlakyRepository::with_records([task.clone()])
                .fail_on(RepoOp::GetById, BackendErrorKind::NodeRecovering),
            FlakyRepository::new(),
        );

        let err = fixture
            .tracker()
            .get_task(&session_for(Role::Mate), &task.id.to_string())
            .await
            .expect_err("should fail");

        assert!(matches!(err, OperationError::DataBase(_)));
    }
}
