use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, warn};
use tracker_core::{User, UserId};

use crate::traits::Authenticator;

/// Username/password sign-in over a fixed set of users.
pub struct InMemoryAuthenticator {
    users: Vec<User>,
    current: RwLock<Option<UserId>>,
}

impl InMemoryAuthenticator {
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users,
            current: RwLock::new(None),
        }
    }

    /// Sign in as `username`; returns the user if the secret matches.
    pub fn sign_in(&self, username: &str, secret: &str) -> Option<User> {
        let user = self
            .users
            .iter()
            .find(|u| u.username == username && u.auth_method.verify(secret))?;
        let Ok(mut current) = self.current.write() else {
            warn!("session lock poisoned, sign-in rejected");
            return None;
        };
        *current = Some(user.id);
        debug!(user = %user.username, role = %user.role, "signed in");
        Some(user.clone())
    }

    pub fn sign_out(&self) {
        if let Ok(mut current) = self.current.write() {
            *current = None;
        }
    }
}

#[async_trait]
impl Authenticator for InMemoryAuthenticator {
    async fn current_user(&self) -> Option<User> {
        let id = (*self.current.read().ok()?)?;
        self.users.iter().find(|u| u.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use tracker_core::{AuthMethod, Role};

    use super::*;
    use crate::session::Session;

    fn alice() -> User {
        User::new(
            "alice",
            Role::Admin,
            AuthMethod::Password {
                secret: "wonderland".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn nobody_is_signed_in_initially() {
        let auth = InMemoryAuthenticator::new(vec![alice()]);

        assert!(auth.current_user().await.is_none());
    }

    #[tokio::test]
    async fn sign_in_with_correct_secret_sets_current_user() {
        let user = alice();
        let auth = InMemoryAuthenticator::new(vec![user.clone()]);

        let signed_in = auth.sign_in("alice", "wonderland");

        assert_eq!(signed_in.as_ref(), Some(&user));
        assert_eq!(auth.current_user().await, Some(user));
    }

    #[tokio::test]
    async fn sign_in_with_wrong_secret_is_rejected() {
        let auth = InMemoryAuthenticator::new(vec![alice()]);

        assert!(auth.sign_in("alice", "looking-glass").is_none());
        assert!(auth.current_user().await.is_none());
    }

    #[tokio::test]
    async fn session_captures_current_user_once() {
        let user = alice();
        let auth = InMemoryAuthenticator::new(vec![user.clone()]);
        auth.sign_in("alice", "wonderland");

        let session = Session::from_authenticator(&auth).await;
        auth.sign_out();

        assert_eq!(session.user(), Some(&user));
        assert!(auth.current_user().await.is_none());
    }
}
