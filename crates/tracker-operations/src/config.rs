use std::path::Path;

use serde::{Deserialize, Serialize};
use tracker_core::Role;

use crate::Result;
use crate::error::OperationError;

/// Which roles may run which group of use cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizationPolicy {
    manage_tasks: Vec<Role>,
    manage_projects: Vec<Role>,
    manage_audit_logs: Vec<Role>,
    read: Vec<Role>,
}

impl Default for AuthorizationPolicy {
    fn default() -> Self {
        Self {
            manage_tasks: vec![Role::Admin, Role::Mate],
            manage_projects: vec![Role::Admin],
            manage_audit_logs: vec![Role::Admin],
            read: vec![Role::Admin, Role::Mate],
        }
    }
}

impl AuthorizationPolicy {
    /// Roles allowed to create, update and delete tasks.
    #[must_use]
    pub fn manage_tasks(&self) -> &[Role] {
        &self.manage_tasks
    }

    /// Roles allowed to create, update and delete projects.
    #[must_use]
    pub fn manage_projects(&self) -> &[Role] {
        &self.manage_projects
    }

    /// Roles allowed to list and delete audit log entries.
    #[must_use]
    pub fn manage_audit_logs(&self) -> &[Role] {
        &self.manage_audit_logs
    }

    /// Roles allowed to read tasks and projects.
    #[must_use]
    pub fn read(&self) -> &[Role] {
        &self.read
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    authorization: AuthorizationPolicy,
}

impl TrackerConfig {
    #[must_use]
    pub fn authorization(&self) -> &AuthorizationPolicy {
        &self.authorization
    }

    /// # Errors
    ///
    /// Returns an error if `content` is not valid TOML for this config.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| OperationError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&content).map_err(|source| OperationError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
