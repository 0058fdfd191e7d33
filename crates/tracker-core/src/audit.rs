use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityType};
use crate::id::{AuditLogId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Create,
    Update,
    Delete,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        write!(f, "{s}")
    }
}

/// Immutable record of one mutating action.
///
/// Entries are written in the same compensating transaction as the mutation
/// they describe. `entity_id` is stored as text so that one log can describe
/// any entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: AuditLogId,
    pub user_id: UserId,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub action_type: ActionType,
}

impl AuditLog {
    /// Build a new entry for `entity`, stamped with the current time.
    #[must_use]
    pub fn record<E: Entity>(
        user_id: UserId,
        action_type: ActionType,
        entity: &E,
        action: impl Into<String>,
    ) -> Self {
        Self {
            id: AuditLogId::new(),
            user_id,
            action: action.into(),
            timestamp: Utc::now(),
            entity_type: E::ENTITY_TYPE,
            entity_id: entity.id().to_string(),
            action_type,
        }
    }

    #[must_use]
    pub fn describes<E: Entity>(&self, entity_id: E::Id) -> bool {
        self.entity_type == E::ENTITY_TYPE && self.entity_id == entity_id.to_string()
    }
}

impl Entity for AuditLog {
    type Id = AuditLogId;

    const ENTITY_TYPE: EntityType = EntityType::AuditLog;

    fn id(&self) -> AuditLogId {
        self.id
    }
}
