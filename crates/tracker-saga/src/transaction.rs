use std::fmt::{Debug, Display};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::command::SharedCommand;
use crate::error::{TransactionError, UndoError};
use crate::guard::RollbackGuard;
use crate::journal::TransactionJournal;

/// A fixed sequence of commands that either all take effect or none do.
///
/// Commands run strictly one after another. If a command fails, previously
/// executed commands are undone in reverse order (LIFO) and the caller-supplied
/// `failure` is reported together with the original error. Running a
/// transaction consumes it.
pub struct CompensatingTransaction<E, F> {
    commands: Vec<SharedCommand<E>>,
    failure: F,
}

impl<E, F> CompensatingTransaction<E, F>
where
    E: Debug + Send + 'static,
    F: Display + Send,
{
    /// Create a transaction over `commands`, reporting `failure` if any fails.
    #[must_use]
    pub fn new(commands: Vec<SharedCommand<E>>, failure: F) -> Self {
        Self { commands, failure }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Run every command in order.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::Aborted` if a command fails and every undo succeeds.
    /// Returns `TransactionError::RollbackIncomplete` if a command fails and some undos also fail.
    pub async fn run(self) -> Result<(), TransactionError<E, F>> {
        let (result, _journal) = self.run_with_journal().await;
        result
    }

    /// Run every command in order and return the journal alongside the result.
    pub async fn run_with_journal(self) -> (Result<(), TransactionError<E, F>>, TransactionJournal) {
        let Self { commands, failure } = self;
        let mut journal = TransactionJournal::new();
        let mut guard = RollbackGuard::new();

        for command in &commands {
            let index = journal.record_start(command.name());
            debug!(step = command.name(), "executing step");

            match command.execute().await {
                Ok(()) => {
                    journal.record_success(index, command.undo_description());
                    guard.push(index, Arc::clone(command));
                }
                Err(error) => {
                    journal.record_failure(index);
                    warn!(
                        step = command.name(),
                        error = ?error,
                        %failure,
                        "step failed, rolling back"
                    );
                    let err =
                        rollback(guard, &mut journal, command.name(), error, failure).await;
                    return (Err(err), journal);
                }
            }
        }

        guard.commit();
        debug!(steps = commands.len(), "transaction committed");
        (Ok(()), journal)
    }
}

async fn rollback<E, F>(
    mut guard: RollbackGuard<E>,
    journal: &mut TransactionJournal,
    failed_step: &str,
    step_error: E,
    failure: F,
) -> TransactionError<E, F>
where
    E: Debug + Send + 'static,
    F: Display,
{
    let mut undo_errors = Vec::new();

    while let Some((index, command)) = guard.last() {
        let step = command.name();
        let description = command.undo_description();
        debug!(step, %description, "undoing step");

        let outcome = command.undo().await;
        guard.settle_last();
        match outcome {
            Ok(()) => journal.record_undone(index),
            Err(error) => {
                warn!(step, error = ?error, "undo failed, continuing rollback");
                journal.record_undo_failed(index);
                undo_errors.push(UndoError {
                    step: step.to_string(),
                    description,
                    error,
                });
            }
        }
    }

    if undo_errors.is_empty() {
        TransactionError::Aborted {
            failure,
            step: failed_step.to_string(),
            source: step_error,
        }
    } else {
        TransactionError::RollbackIncomplete {
            failure,
            step: failed_step.to_string(),
            step_error,
            undo_errors,
        }
    }
}
