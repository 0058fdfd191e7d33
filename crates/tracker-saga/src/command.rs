use std::sync::Arc;

use async_trait::async_trait;

/// A reversible unit of work.
///
/// Commands capture everything they need at construction time (for example
/// the already-fetched entity a delete has to restore). They are run at most
/// once and are not reused after [`undo`](Command::undo).
#[async_trait]
pub trait Command: Send + Sync {
    /// Error type for execution and undo failures.
    type Error: Send;

    /// Human-readable name for logging and error messages.
    fn name(&self) -> &'static str;

    /// Perform the command's effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the effect could not be applied. The enclosing
    /// transaction then undoes every command that ran before this one.
    async fn execute(&self) -> Result<(), Self::Error>;

    /// Revert the effect of a successful [`execute`](Command::execute).
    ///
    /// Only called after `execute` returned `Ok`. The default implementation
    /// is a no-op, suitable for read-only commands.
    ///
    /// # Errors
    ///
    /// Returns an error if the previous state could not be restored.
    async fn undo(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Human-readable description of what undo will do.
    fn undo_description(&self) -> String {
        format!("undo {}", self.name())
    }
}

/// Type-erased command as stored by a transaction.
pub type SharedCommand<E> = Arc<dyn Command<Error = E>>;
