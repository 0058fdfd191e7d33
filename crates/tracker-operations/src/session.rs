use tracker_core::User;

use crate::traits::Authenticator;

/// The actor a use case runs on behalf of.
///
/// Passed explicitly into every use case instead of looking the current user
/// up from ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_user(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// Capture whoever is signed in on `authenticator` right now.
    pub async fn from_authenticator<A>(authenticator: &A) -> Self
    where
        A: Authenticator + ?Sized,
    {
        Self {
            user: authenticator.current_user().await,
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
