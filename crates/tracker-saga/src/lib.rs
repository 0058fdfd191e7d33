//! Compensating transactions for multi-step operations.
//!
//! Storage backends used by the tracker have no multi-statement transaction
//! primitive. This crate simulates atomicity: a [`CompensatingTransaction`]
//! runs its [`Command`]s in order and, if one fails, undoes every command that
//! already succeeded in reverse order before reporting a single failure.

mod builder;
mod command;
mod error;
mod guard;
mod journal;
mod transaction;

pub use builder::TransactionBuilder;
pub use command::{Command, SharedCommand};
pub use error::{TransactionError, UndoError};
pub use journal::{StepRecord, StepStatus, TransactionJournal};
pub use transaction::CompensatingTransaction;
