use std::fmt::{Debug, Display};

use thiserror::Error;

/// Error from a failed undo during rollback.
#[derive(Debug, Error)]
#[error("undo failed for step '{step}': {description}")]
pub struct UndoError<E> {
    /// Name of the command whose undo failed.
    pub step: String,
    /// Description of what the undo was trying to do.
    pub description: String,
    /// The underlying error.
    #[source]
    pub error: E,
}

/// Error from running a compensating transaction.
///
/// Both variants carry the caller-supplied `failure` value that names the
/// operation as a whole, plus the error of the command that failed.
#[derive(Debug, Error)]
pub enum TransactionError<E: Debug, F: Display> {
    /// A command failed and every executed command was undone.
    #[error("{failure}: step '{step}' failed")]
    Aborted {
        /// Caller-supplied failure describing the whole operation.
        failure: F,
        /// Name of the command that failed.
        step: String,
        /// The error that caused the command to fail.
        #[source]
        source: E,
    },

    /// A command failed and some undos also failed.
    #[error("{failure}: step '{step}' failed, and {} undo(s) also failed", undo_errors.len())]
    RollbackIncomplete {
        /// Caller-supplied failure describing the whole operation.
        failure: F,
        /// Name of the command that failed.
        step: String,
        /// The error from the failed command.
        #[source]
        step_error: E,
        /// Errors from failed undos, in the order they were attempted.
        undo_errors: Vec<UndoError<E>>,
    },
}

impl<E: Debug, F: Display> TransactionError<E, F> {
    /// The caller-supplied failure value.
    #[must_use]
    pub fn failure(&self) -> &F {
        match self {
            Self::Aborted { failure, .. } | Self::RollbackIncomplete { failure, .. } => failure,
        }
    }

    /// Name of the command whose execution failed.
    #[must_use]
    pub fn failed_step(&self) -> &str {
        match self {
            Self::Aborted { step, .. } | Self::RollbackIncomplete { step, .. } => step,
        }
    }

    /// Whether every executed command was undone.
    #[must_use]
    pub fn is_rolled_back(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}
