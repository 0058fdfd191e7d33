use std::fmt::{Debug, Display};
use std::sync::Arc;

use crate::command::{Command, SharedCommand};
use crate::transaction::CompensatingTransaction;

/// Builder collecting commands in execution order.
///
/// ```
/// use async_trait::async_trait;
/// use tracker_saga::{Command, TransactionBuilder};
///
/// struct Noop;
///
/// #[async_trait]
/// impl Command for Noop {
///     type Error = std::io::Error;
///     fn name(&self) -> &'static str { "noop" }
///     async fn execute(&self) -> Result<(), std::io::Error> { Ok(()) }
/// }
///
/// let transaction = TransactionBuilder::new()
///     .then(Noop)
///     .then(Noop)
///     .build("unable to do nothing");
/// assert_eq!(transaction.len(), 2);
/// ```
pub struct TransactionBuilder<E> {
    commands: Vec<SharedCommand<E>>,
}

impl<E> TransactionBuilder<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Append a command to the sequence.
    #[must_use]
    pub fn then<C>(mut self, command: C) -> Self
    where
        C: Command<Error = E> + 'static,
    {
        self.commands.push(Arc::new(command));
        self
    }

    /// Append a command only when `condition` holds.
    #[must_use]
    pub fn then_if<C>(self, condition: bool, command: C) -> Self
    where
        C: Command<Error = E> + 'static,
    {
        if condition { self.then(command) } else { self }
    }

    /// Append an already shared command.
    #[must_use]
    pub fn then_shared(mut self, command: SharedCommand<E>) -> Self {
        self.commands.push(command);
        self
    }

    /// Finish the sequence, naming the failure to report if any command fails.
    #[must_use]
    pub fn build<F>(self, failure: F) -> CompensatingTransaction<E, F>
    where
        E: Debug + Send + 'static,
        F: Display + Send,
    {
        CompensatingTransaction::new(self.commands, failure)
    }
}

impl<E> Default for TransactionBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
