//! Workflow error types for expense lifecycle management.

use thiserror::Error;

use crate::workflow::types::ExpenseStatus;

/// Errors that can occur during workflow operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Attempted a status transition outside the allowed graph.
    #[error(
        "Invalid status transition from {from} to {to}. Allowed transitions: {}",
        format_allowed(.allowed)
    )]
    InvalidTransition {
        /// The current status.
        from: ExpenseStatus,
        /// The attempted target status.
        to: ExpenseStatus,
        /// Targets reachable from `from`.
        allowed: &'static [ExpenseStatus],
    },
}

fn format_allowed(allowed: &[ExpenseStatus]) -> String {
    if allowed.is_empty() {
        return "none".to_string();
    }
    allowed
        .iter()
        .map(ExpenseStatus::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
