//! Reversible storage commands used by the use cases.
//!
//! Each command wraps exactly one repository call per direction, and each of
//! those calls goes through [`normalize`](crate::normalize).

mod audit;
mod create;
mod delete;
mod update;

pub use audit::WriteAuditLog;
pub use create::CreateEntity;
pub use delete::DeleteEntity;
pub use update::UpdateEntity;

use tracker_core::EntityType;

#[derive(Clone, Copy)]
enum Verb {
    Create,
    Update,
    Delete,
}

fn step_name(verb: Verb, entity: EntityType) -> &'static str {
    match (verb, entity) {
        (Verb::Create, EntityType::Task) => "create_task",
        (Verb::Create, EntityType::Project) => "create_project",
        (Verb::Create, EntityType::User) => "create_user",
        (Verb::Create, EntityType::AuditLog) => "create_audit_log",
        (Verb::Update, EntityType::Task) => "update_task",
        (Verb::Update, EntityType::Project) => "update_project",
        (Verb::Update, EntityType::User) => "update_user",
        (Verb::Update, EntityType::AuditLog) => "update_audit_log",
        (Verb::Delete, EntityType::Task) => "delete_task",
        (Verb::Delete, EntityType::Project) => "delete_project",
        (Verb::Delete, EntityType::User) => "delete_user",
        (Verb::Delete, EntityType::AuditLog) => "delete_audit_log",
    }
}
