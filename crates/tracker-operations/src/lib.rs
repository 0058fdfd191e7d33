mod authorization;
pub mod commands;
pub mod config;
mod error;
mod normalize;
pub mod operations;
pub mod providers;
mod session;
mod storage;
pub mod traits;

#[cfg(test)]
mod mocks;

pub use authorization::{ADMIN_ONLY, authorize, authorize_admin};
pub use error::{OperationError, Result, RollbackFailure, UseCaseFailure};
pub use normalize::{fallback, normalize, normalize_error};
pub use session::Session;
pub use storage::{BackendError, BackendErrorKind, StorageError, StorageResult};
