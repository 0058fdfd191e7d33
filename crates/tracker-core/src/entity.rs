use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::id::{AuditLogId, ProjectId, TaskId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Project,
    Task,
    User,
    AuditLog,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Project => "project",
            Self::Task => "task",
            Self::User => "user",
            Self::AuditLog => "audit log",
        };
        write!(f, "{s}")
    }
}

impl EntityType {
    /// Parse `raw` as an id of this type and return it in canonical form.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MalformedId` if `raw` is not a valid id.
    pub fn canonical_id(self, raw: &str) -> Result<String> {
        Ok(match self {
            Self::Project => raw.parse::<ProjectId>()?.to_string(),
            Self::Task => raw.parse::<TaskId>()?.to_string(),
            Self::User => raw.parse::<UserId>()?.to_string(),
            Self::AuditLog => raw.parse::<AuditLogId>()?.to_string(),
        })
    }
}

/// A record that a repository can store and look up by id.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static;

    const ENTITY_TYPE: EntityType;

    fn id(&self) -> Self::Id;
}
