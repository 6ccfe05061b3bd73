//! Error type shared by the report and expense services.

use std::fmt;

use expensa_shared::AppError;
use expensa_shared::types::{ExpenseId, ReportId};
use thiserror::Error;

use crate::workflow::{ExpenseStatus, WorkflowError};

/// Mutation refused by the modifiability guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Field update.
    Modify,
    /// Deletion.
    Delete,
    /// Creating an expense under a report.
    AddExpense,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Modify => "modify",
            Self::Delete => "delete",
            Self::AddExpense => "add expenses to",
        };
        f.write_str(verb)
    }
}

/// Errors returned by `ReportService` and `ExpenseService`.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Report absent, or owned by another user.
    #[error("Expense report with ID {0} not found")]
    ReportNotFound(ReportId),

    /// Expense absent, or its report is owned by another user.
    #[error("Expense with ID {0} not found")]
    ExpenseNotFound(ExpenseId),

    /// Illegal status transition.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Report status no longer permits the operation.
    #[error("Cannot {operation} expense report {id} with status {status}")]
    ReportLocked {
        /// Report id.
        id: ReportId,
        /// Current report status.
        status: ExpenseStatus,
        /// Refused operation.
        operation: Operation,
    },

    /// Expense or parent report status no longer permits the operation.
    #[error("Cannot {operation} expense {id} with status {status} or report status {report_status}")]
    ExpenseLocked {
        /// Expense id.
        id: ExpenseId,
        /// Current expense status.
        status: ExpenseStatus,
        /// Current parent report status.
        report_status: ExpenseStatus,
        /// Refused operation.
        operation: Operation,
    },

    /// Submission of a report that has no expenses.
    #[error("Cannot submit expense report {0} without expenses")]
    EmptySubmission(ReportId),

    /// Persistence gateway failure.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl ServiceError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err {
            ServiceError::ReportNotFound(_) | ServiceError::ExpenseNotFound(_) => {
                Self::NotFound(message)
            }
            ServiceError::Workflow(_)
            | ServiceError::ReportLocked { .. }
            | ServiceError::ExpenseLocked { .. } => Self::Conflict(message),
            ServiceError::EmptySubmission(_) => Self::BusinessRule(message),
            ServiceError::Repository(_) => Self::Database(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn report_id() -> ReportId {
        ReportId::from_uuid(Uuid::from_u128(7))
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ServiceError::ReportNotFound(report_id());
        assert_eq!(
            err.to_string(),
            "Expense report with ID 00000000-0000-0000-0000-000000000007 not found"
        );
        let app: AppError = err.into();
        assert_eq!(app.status_code(), 404);
        assert_eq!(app.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_report_locked_message() {
        let err = ServiceError::ReportLocked {
            id: report_id(),
            status: ExpenseStatus::Paid,
            operation: Operation::AddExpense,
        };
        assert_eq!(
            err.to_string(),
            "Cannot add expenses to expense report 00000000-0000-0000-0000-000000000007 with status PAID"
        );
        let app: AppError = err.into();
        assert_eq!(app.status_code(), 409);
    }

    #[test]
    fn test_expense_locked_names_both_statuses() {
        let err = ServiceError::ExpenseLocked {
            id: ExpenseId::from_uuid(Uuid::from_u128(9)),
            status: ExpenseStatus::Created,
            report_status: ExpenseStatus::Validated,
            operation: Operation::Delete,
        };
        let message = err.to_string();
        assert!(message.starts_with("Cannot delete expense"));
        assert!(message.contains("status CREATED"));
        assert!(message.contains("report status VALIDATED"));
    }

    #[test]
    fn test_workflow_error_is_conflict() {
        let err: ServiceError = WorkflowError::InvalidTransition {
            from: ExpenseStatus::Paid,
            to: ExpenseStatus::Validated,
            allowed: &[],
        }
        .into();
        let app: AppError = err.into();
        assert_eq!(app.status_code(), 409);
        assert_eq!(app.error_code(), "CONFLICT");
        assert!(app.message().contains("Allowed transitions: none"));
    }

    #[test]
    fn test_empty_submission_is_unprocessable() {
        let err = ServiceError::EmptySubmission(report_id());
        let app: AppError = err.into();
        assert_eq!(app.status_code(), 422);
        assert_eq!(app.error_code(), "UNPROCESSABLE_ENTITY");
    }

    #[test]
    fn test_repository_error_is_database() {
        let app: AppError = ServiceError::repository("connection reset").into();
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.error_code(), "DATABASE_ERROR");
        assert_eq!(app.message(), "Repository error: connection reset");
    }
}
