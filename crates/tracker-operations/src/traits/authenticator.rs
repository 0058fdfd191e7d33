use async_trait::async_trait;
use tracker_core::User;

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// The user of the current session, if anyone is signed in.
    async fn current_user(&self) -> Option<User>;
}
