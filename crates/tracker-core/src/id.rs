use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|source| CoreError::MalformedId {
                        kind: $kind,
                        value: s.to_string(),
                        source,
                    })
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Task`](crate::Task).
    TaskId,
    "task"
);
entity_id!(
    /// Identifier of a [`Project`](crate::Project).
    ProjectId,
    "project"
);
entity_id!(
    /// Identifier of a [`User`](crate::User).
    UserId,
    "user"
);
entity_id!(
    /// Identifier of an [`AuditLog`](crate::AuditLog) entry.
    AuditLogId,
    "audit log"
);
