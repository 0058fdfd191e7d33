use std::future::Future;

use tracing::warn;
use tracker_core::{Role, User};

use crate::Result;
use crate::error::OperationError;
use crate::session::Session;

pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Run `operation` only if the session's user holds one of `allowed` roles.
///
/// The operation receives the authorized user and is invoked at most once.
/// It is never invoked when authorization fails.
///
/// # Errors
///
/// Returns `OperationError::NoLoggedInUser` if the session has no user,
/// `OperationError::Unauthorized` if the user's role is not allowed, and
/// otherwise whatever `operation` returns.
pub async fn authorize<T, Op, Fut>(session: &Session, allowed: &[Role], operation: Op) -> Result<T>
where
    Op: FnOnce(User) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let Some(user) = session.user() else {
        warn!("rejected operation without a logged-in user");
        return Err(OperationError::NoLoggedInUser);
    };

    if !allowed.contains(&user.role) {
        warn!(
            user = %user.username,
            role = %user.role,
            "rejected operation for insufficient role"
        );
        return Err(OperationError::Unauthorized {
            required: allowed.to_vec(),
            actual: user.role,
        });
    }

    operation(user.clone()).await
}

/// [`authorize`] with the default `{Admin}` role set.
///
/// # Errors
///
/// See [`authorize`].
pub async fn authorize_admin<T, Op, Fut>(session: &Session, operation: Op) -> Result<T>
where
    Op: FnOnce(User) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    authorize(session, ADMIN_ONLY, operation).await
}
