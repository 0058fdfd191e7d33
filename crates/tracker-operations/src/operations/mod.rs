//! Use cases of the tracker.
//!
//! Every use case runs behind the authorization gate. Mutating use cases
//! write one audit log entry and perform one mutation inside a single
//! compensating transaction, so either both are stored or neither is.

mod audit;
mod project;
mod task;
mod tracker;

pub use project::{NewProject, ProjectChanges};
pub use task::{NewTask, TaskChanges};
pub use tracker::Tracker;

use crate::Result;
use crate::error::OperationError;

fn require_non_empty(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(OperationError::invalid_input(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_values_are_trimmed() -> anyhow::Result<()> {
        assert_eq!(require_non_empty("title", "  launch  ")?, "launch");
        Ok(())
    }

    #[test]
    fn blank_values_are_rejected() {
        let err = require_non_empty("title", " \t ").expect_err("should reject blank");

        assert!(matches!(
            err,
            OperationError::InvalidInput { field: "title", .. }
        ));
    }
}
