//! Workflow service for expense status transitions.
//!
//! One transition table governs both expense reports and expenses. Every
//! rule is an exhaustive `match` so a new status cannot slip through a
//! default arm.

use crate::workflow::error::WorkflowError;
use crate::workflow::types::ExpenseStatus;

/// Stateless service holding the status graph and modifiability rule.
pub struct WorkflowService;

impl WorkflowService {
    /// Returns the statuses reachable in one step from `from`.
    ///
    /// | current   | allowed targets       |
    /// |-----------|-----------------------|
    /// | Created   | Submitted             |
    /// | Submitted | Validated, Rejected   |
    /// | Validated | Paid                  |
    /// | Rejected  | (none)                |
    /// | Paid      | (none)                |
    #[must_use]
    pub fn allowed_transitions(from: ExpenseStatus) -> &'static [ExpenseStatus] {
        match from {
            ExpenseStatus::Created => &[ExpenseStatus::Submitted],
            ExpenseStatus::Submitted => &[ExpenseStatus::Validated, ExpenseStatus::Rejected],
            ExpenseStatus::Validated => &[ExpenseStatus::Paid],
            ExpenseStatus::Rejected | ExpenseStatus::Paid => &[],
        }
    }

    /// Check if a status transition is valid. Self-transitions never are.
    #[must_use]
    pub fn is_valid_transition(from: ExpenseStatus, to: ExpenseStatus) -> bool {
        Self::allowed_transitions(from).contains(&to)
    }

    /// Validate a status transition.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidTransition` naming both statuses and
    /// the allowed targets when `to` is not reachable from `from`.
    pub fn validate_transition(
        from: ExpenseStatus,
        to: ExpenseStatus,
    ) -> Result<(), WorkflowError> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(WorkflowError::InvalidTransition {
                from,
                to,
                allowed: Self::allowed_transitions(from),
            })
        }
    }

    /// Returns true while field edits and deletion are still permitted.
    #[must_use]
    pub fn is_modifiable(status: ExpenseStatus) -> bool {
        match status {
            ExpenseStatus::Created | ExpenseStatus::Submitted => true,
            ExpenseStatus::Validated | ExpenseStatus::Rejected | ExpenseStatus::Paid => false,
        }
    }

    /// Returns true if no transition leaves `status`.
    #[must_use]
    pub fn is_terminal(status: ExpenseStatus) -> bool {
        Self::allowed_transitions(status).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use ExpenseStatus::{Created, Paid, Rejected, Submitted, Validated};

    #[rstest]
    #[case(Created, Submitted)]
    #[case(Submitted, Validated)]
    #[case(Submitted, Rejected)]
    #[case(Validated, Paid)]
    fn test_allowed_transitions_succeed(#[case] from: ExpenseStatus, #[case] to: ExpenseStatus) {
        assert!(WorkflowService::validate_transition(from, to).is_ok());
    }

    #[rstest]
    #[case(Created, Created)]
    #[case(Created, Validated)]
    #[case(Created, Paid)]
    #[case(Submitted, Created)]
    #[case(Submitted, Paid)]
    #[case(Validated, Submitted)]
    #[case(Validated, Rejected)]
    #[case(Rejected, Submitted)]
    #[case(Rejected, Created)]
    #[case(Paid, Validated)]
    #[case(Paid, Paid)]
    fn test_disallowed_transitions_fail(#[case] from: ExpenseStatus, #[case] to: ExpenseStatus) {
        let err = WorkflowService::validate_transition(from, to).unwrap_err();
        let WorkflowError::InvalidTransition {
            from: err_from,
            to: err_to,
            allowed,
        } = err;
        assert_eq!(err_from, from);
        assert_eq!(err_to, to);
        assert_eq!(allowed, WorkflowService::allowed_transitions(from));
    }

    #[rstest]
    #[case(Created, true)]
    #[case(Submitted, true)]
    #[case(Validated, false)]
    #[case(Rejected, false)]
    #[case(Paid, false)]
    fn test_is_modifiable(#[case] status: ExpenseStatus, #[case] expected: bool) {
        assert_eq!(WorkflowService::is_modifiable(status), expected);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(WorkflowService::is_terminal(Rejected));
        assert!(WorkflowService::is_terminal(Paid));
        assert!(!WorkflowService::is_terminal(Created));
        assert!(!WorkflowService::is_terminal(Submitted));
        assert!(!WorkflowService::is_terminal(Validated));
    }

    #[test]
    fn test_paid_error_message_lists_none() {
        let err = WorkflowService::validate_transition(Paid, Validated).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status transition from PAID to VALIDATED. Allowed transitions: none"
        );
    }
}
