use std::future::Future;

use tracing::debug;
use tracker_core::EntityType;

use crate::Result;
use crate::error::OperationError;
use crate::storage::{BackendError, BackendErrorKind, StorageError};

/// Run one storage call and translate its failure into the domain vocabulary.
///
/// | backend failure | result |
/// |---|---|
/// | connectivity, timeout, interrupted, node recovering | [`OperationError::DataBase`] |
/// | authentication, security | [`OperationError::UnauthorizedAccess`] |
/// | anything else | `fallback(error)` |
/// | domain error raised by the repository | passed through unchanged |
///
/// # Errors
///
/// Returns the normalized error if `operation` fails.
pub async fn normalize<T, Fut, Fb>(fallback: Fb, operation: Fut) -> Result<T>
where
    Fut: Future<Output = std::result::Result<T, StorageError>>,
    Fb: FnOnce(BackendError) -> OperationError,
{
    operation.await.map_err(|err| normalize_error(err, fallback))
}

/// Translate an already-obtained storage error. See [`normalize`].
pub fn normalize_error<Fb>(err: StorageError, fallback: Fb) -> OperationError
where
    Fb: FnOnce(BackendError) -> OperationError,
{
    match err {
        StorageError::Domain(err) => *err,
        StorageError::Backend(err) => match err.kind() {
            BackendErrorKind::Connectivity
            | BackendErrorKind::Timeout
            | BackendErrorKind::Interrupted
            | BackendErrorKind::NodeRecovering => OperationError::DataBase(err),
            BackendErrorKind::Authentication | BackendErrorKind::Security => {
                OperationError::UnauthorizedAccess(err)
            }
            BackendErrorKind::Other => {
                debug!(error = %err, "unclassified backend error, using fallback");
                fallback(err)
            }
        },
    }
}

/// Fallback reporting a failed `action` on `entity`, keeping the backend error as cause.
pub fn fallback(
    action: &'static str,
    entity: EntityType,
) -> impl FnOnce(BackendError) -> OperationError {
    move |source| OperationError::Storage {
        action,
        entity,
        source,
    }
}
