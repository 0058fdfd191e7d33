use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tracker_core::{Entity, EntityType, Role};
use tracker_saga::TransactionError;

use crate::storage::BackendError;

/// Names the use case a failed compensating transaction belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseCaseFailure {
    UnableToCreateTask,
    UnableToUpdateTask,
    UnableToDeleteTask,
    UnableToCreateProject,
    UnableToUpdateProject,
    UnableToDeleteProject,
    UnableToDeleteAuditLog,
}

impl fmt::Display for UseCaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UnableToCreateTask => "unable to create task",
            Self::UnableToUpdateTask => "unable to update task",
            Self::UnableToDeleteTask => "unable to delete task",
            Self::UnableToCreateProject => "unable to create project",
            Self::UnableToUpdateProject => "unable to update project",
            Self::UnableToDeleteProject => "unable to delete project",
            Self::UnableToDeleteAuditLog => "unable to delete audit log",
        };
        write!(f, "{s}")
    }
}

/// Details about a failed undo during rollback.
#[derive(Debug)]
pub struct RollbackFailure {
    /// Name of the step whose undo failed.
    pub step: String,
    /// Description of what the undo was trying to do.
    pub description: String,
    /// The error that occurred during undo.
    pub error: Box<OperationError>,
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error(transparent)]
    InvalidId(#[from] tracker_core::CoreError),

    #[error("{entity} '{id}' not found")]
    NotFound { entity: EntityType, id: String },

    #[error("no user is logged in")]
    NoLoggedInUser,

    #[error(
        "role '{actual}' is not allowed (requires one of: {})",
        required.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    )]
    Unauthorized { required: Vec<Role>, actual: Role },

    #[error("storage backend is unavailable")]
    DataBase(#[source] BackendError),

    #[error("storage backend denied access")]
    UnauthorizedAccess(#[source] BackendError),

    #[error("failed to {action} {entity}")]
    Storage {
        action: &'static str,
        entity: EntityType,
        #[source]
        source: BackendError,
    },

    #[error("{failure}")]
    UseCase {
        failure: UseCaseFailure,
        step: String,
        #[source]
        source: Box<OperationError>,
    },

    #[error("{failure}, and {} rollback step(s) also failed", rollback_failures.len())]
    RollbackIncomplete {
        failure: UseCaseFailure,
        step: String,
        source: Box<OperationError>,
        rollback_failures: Vec<RollbackFailure>,
    },

    #[error("failed to read config file '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;

impl OperationError {
    #[must_use]
    pub fn not_found<E: Entity>(id: E::Id) -> Self {
        Self::NotFound {
            entity: E::ENTITY_TYPE,
            id: id.to_string(),
        }
    }

    pub(crate) fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// The use case that failed, if this error came out of a transaction.
    #[must_use]
    pub fn use_case_failure(&self) -> Option<UseCaseFailure> {
        match self {
            Self::UseCase { failure, .. } | Self::RollbackIncomplete { failure, .. } => {
                Some(*failure)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<TransactionError<OperationError, UseCaseFailure>> for OperationError {
    fn from(err: TransactionError<OperationError, UseCaseFailure>) -> Self {
        match err {
            TransactionError::Aborted {
                failure,
                step,
                source,
            } => Self::UseCase {
                failure,
                step,
                source: Box::new(source),
            },
            TransactionError::RollbackIncomplete {
                failure,
                step,
                step_error,
                undo_errors,
            } => {
                let rollback_failures = undo_errors
                    .into_iter()
                    .map(|e| RollbackFailure {
                        step: e.step,
                        description: e.description,
                        error: Box::new(e.error),
                    })
                    .collect();
                Self::RollbackIncomplete {
                    failure,
                    step,
                    source: Box::new(step_error),
                    rollback_failures,
                }
            }
        }
    }
}
