//! Workflow domain types for expense lifecycle management.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status shared by expense reports and expenses.
///
/// Reports and expenses each carry their own status and move through the
/// same graph independently:
/// - Created → Submitted
/// - Submitted → Validated | Rejected
/// - Validated → Paid
///
/// Rejected and Paid are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseStatus {
    /// Freshly created, still being filled in.
    Created,
    /// Handed in for review.
    Submitted,
    /// Accepted by a reviewer, awaiting payment.
    Validated,
    /// Refused by a reviewer.
    Rejected,
    /// Reimbursed.
    Paid,
}

impl ExpenseStatus {
    /// Every status, in the declaration order of the `expense_status` type.
    pub const ALL: [Self; 5] = [
        Self::Created,
        Self::Submitted,
        Self::Validated,
        Self::Rejected,
        Self::Paid,
    ];

    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Submitted => "SUBMITTED",
            Self::Validated => "VALIDATED",
            Self::Rejected => "REJECTED",
            Self::Paid => "PAID",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(ExpenseStatus::Created.as_str(), "CREATED");
        assert_eq!(ExpenseStatus::Submitted.as_str(), "SUBMITTED");
        assert_eq!(ExpenseStatus::Validated.as_str(), "VALIDATED");
        assert_eq!(ExpenseStatus::Rejected.as_str(), "REJECTED");
        assert_eq!(ExpenseStatus::Paid.as_str(), "PAID");
    }

    #[test]
    fn test_status_serde_uses_uppercase() {
        let json = serde_json::to_string(&ExpenseStatus::Submitted).unwrap();
        assert_eq!(json, "\"SUBMITTED\"");
        let parsed: ExpenseStatus = serde_json::from_str("\"PAID\"").unwrap();
        assert_eq!(parsed, ExpenseStatus::Paid);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", ExpenseStatus::Created), "CREATED");
        assert_eq!(format!("{}", ExpenseStatus::Paid), "PAID");
    }
}
