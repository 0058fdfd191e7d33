use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityType};
use crate::id::{ProjectId, TaskId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Mate,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Admin => "admin",
            Self::Mate => "mate",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum AuthMethod {
    Password { secret: String },
}

impl AuthMethod {
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        match self {
            Self::Password { secret } => secret == candidate,
        }
    }
}

impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password { .. } => f
                .debug_struct("Password")
                .field("secret", &"<redacted>")
                .finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub auth_method: AuthMethod,
}

impl User {
    #[must_use]
    pub fn new(username: impl Into<String>, role: Role, auth_method: AuthMethod) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            role,
            auth_method,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Todo => "todo",
            Self::InProgress => "in progress",
            Self::Done => "done",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assignee: Option<UserId>,
}

impl Task {
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            project_id,
            title: title.into(),
            description: String::new(),
            status: TaskStatus::default(),
            assignee: None,
        }
    }
}

impl Entity for Task {
    type Id = TaskId;

    const ENTITY_TYPE: EntityType = EntityType::Task;

    fn id(&self) -> TaskId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
}

impl Project {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            description: String::new(),
        }
    }
}

impl Entity for Project {
    type Id = ProjectId;

    const ENTITY_TYPE: EntityType = EntityType::Project;

    fn id(&self) -> ProjectId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_debug_output_hides_secret() {
        let method = AuthMethod::Password {
            secret: "hunter2".to_string(),
        };

        let debug = format!("{method:?}");

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn password_verification_compares_secret() {
        let method = AuthMethod::Password {
            secret: "hunter2".to_string(),
        };

        assert!(method.verify("hunter2"));
        assert!(!method.verify("hunter3"));
    }

    #[test]
    fn new_task_starts_as_todo_without_assignee() {
        let task = Task::new(ProjectId::new(), "write docs");

        assert_eq!(task.status, TaskStatus::Todo);
        assert!(task.assignee.is_none());
        assert!(task.description.is_empty());
    }

    #[test]
    fn role_serializes_lowercase() -> anyhow::Result<()> {
        #[derive(Serialize)]
        struct Wrapper {
            role: Role,
        }

        let rendered = toml::to_string(&Wrapper { role: Role::Mate })?;

        assert_eq!(rendered.trim(), "role = \"mate\"");
        Ok(())
    }
}
