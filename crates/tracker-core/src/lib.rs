//! Domain model shared by the tracker crates.
//!
//! Nothing in here performs I/O. Storage, authentication and orchestration
//! live in `tracker-operations` and `tracker-saga`.

mod audit;
mod entity;
pub mod error;
mod id;
pub mod types;

pub use audit::{ActionType, AuditLog};
pub use entity::{Entity, EntityType};
pub use error::{CoreError, Result};
pub use id::{AuditLogId, ProjectId, TaskId, UserId};
pub use types::*;
