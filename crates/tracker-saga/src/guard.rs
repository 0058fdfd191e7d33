use std::fmt::Debug;
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, error};

use crate::command::SharedCommand;

/// Holds the executed prefix of a running transaction.
///
/// Commands are pushed as they succeed and released once their undo settles.
/// If the guard is dropped while still holding commands, the transaction future
/// was dropped mid-sequence or mid-rollback; the remaining commands, including
/// one whose undo was interrupted, are then undone in reverse order on the
/// current tokio runtime.
pub(crate) struct RollbackGuard<E>
where
    E: Debug + Send + 'static,
{
    executed: Vec<(usize, SharedCommand<E>)>,
}

impl<E> RollbackGuard<E>
where
    E: Debug + Send + 'static,
{
    pub(crate) fn new() -> Self {
        Self {
            executed: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, index: usize, command: SharedCommand<E>) {
        self.executed.push((index, command));
    }

    /// The newest command that has not been undone yet.
    ///
    /// It stays in the guard until [`settle_last`](Self::settle_last), so an
    /// undo interrupted by a drop is run again from `Drop`.
    pub(crate) fn last(&self) -> Option<(usize, SharedCommand<E>)> {
        self.executed
            .last()
            .map(|(index, command)| (*index, Arc::clone(command)))
    }

    /// Forget the newest command once its undo has finished, whatever the outcome.
    pub(crate) fn settle_last(&mut self) {
        self.executed.pop();
    }

    /// Forget the executed prefix; the transaction is complete.
    pub(crate) fn commit(mut self) {
        self.executed.clear();
    }
}

impl<E> Drop for RollbackGuard<E>
where
    E: Debug + Send + 'static,
{
    fn drop(&mut self) {
        if self.executed.is_empty() {
            return;
        }

        let executed = std::mem::take(&mut self.executed);
        let Ok(handle) = Handle::try_current() else {
            error!(
                pending = executed.len(),
                "transaction dropped outside a tokio runtime; executed steps were not undone"
            );
            return;
        };

        debug!(
            pending = executed.len(),
            "transaction dropped mid-sequence, scheduling rollback"
        );
        handle.spawn(async move {
            for (_, command) in executed.into_iter().rev() {
                if let Err(err) = command.undo().await {
                    error!(
                        step = command.name(),
                        error = ?err,
                        "undo after cancellation failed"
                    );
                }
            }
        });
    }
}
