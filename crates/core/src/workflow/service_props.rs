//! Property-based tests for WorkflowService.

use proptest::prelude::*;

use crate::workflow::service::WorkflowService;
use crate::workflow::types::ExpenseStatus;

/// Strategy for generating random ExpenseStatus values.
fn arb_status() -> impl Strategy<Value = ExpenseStatus> {
    prop_oneof![
        Just(ExpenseStatus::Created),
        Just(ExpenseStatus::Submitted),
        Just(ExpenseStatus::Validated),
        Just(ExpenseStatus::Rejected),
        Just(ExpenseStatus::Paid),
    ]
}

/// The table written out as explicit pairs.
fn expected_valid(from: ExpenseStatus, to: ExpenseStatus) -> bool {
    matches!(
        (from, to),
        (ExpenseStatus::Created, ExpenseStatus::Submitted)
            | (
                ExpenseStatus::Submitted,
                ExpenseStatus::Validated | ExpenseStatus::Rejected
            )
            | (ExpenseStatus::Validated, ExpenseStatus::Paid)
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// validate_transition succeeds exactly for the pairs in the table.
    #[test]
    fn prop_validate_matches_table(from in arb_status(), to in arb_status()) {
        let result = WorkflowService::validate_transition(from, to);
        prop_assert_eq!(result.is_ok(), expected_valid(from, to));
    }

    /// No status may transition to itself.
    #[test]
    fn prop_no_self_transition(status in arb_status()) {
        prop_assert!(!WorkflowService::is_valid_transition(status, status));
    }

    /// Terminal statuses refuse every target.
    #[test]
    fn prop_terminal_refuses_everything(to in arb_status()) {
        prop_assert!(WorkflowService::validate_transition(ExpenseStatus::Rejected, to).is_err());
        prop_assert!(WorkflowService::validate_transition(ExpenseStatus::Paid, to).is_err());
    }

    /// A failed transition names the allowed targets, or "none" for terminal states.
    #[test]
    fn prop_error_message_names_allowed(from in arb_status(), to in arb_status()) {
        prop_assume!(!expected_valid(from, to));
        let message = WorkflowService::validate_transition(from, to).unwrap_err().to_string();
        let allowed = WorkflowService::allowed_transitions(from);
        if allowed.is_empty() {
            prop_assert!(message.ends_with("none"));
        } else {
            for target in allowed {
                prop_assert!(message.contains(target.as_str()));
            }
        }
    }

    /// Modifiable statuses are exactly the non-reviewed ones.
    #[test]
    fn prop_modifiable_set(status in arb_status()) {
        let expected = matches!(status, ExpenseStatus::Created | ExpenseStatus::Submitted);
        prop_assert_eq!(WorkflowService::is_modifiable(status), expected);
    }
}
