//! Expense domain types.

use chrono::{DateTime, NaiveDate, Utc};
use expensa_shared::types::{ExpenseId, ReportId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attachment::Attachment;
use crate::report::ReportSummary;
use crate::workflow::ExpenseStatus;

/// Fixed expense categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    /// Meals and refreshments.
    Meals,
    /// Flights, trains and other long-distance travel.
    Travel,
    /// Office supplies.
    Supplies,
    /// Team events.
    TeamEvent,
    /// Parking fees.
    Parking,
    /// Hotels and lodging.
    Accommodation,
    /// Local transport.
    Transport,
    /// Anything else.
    Other,
}

impl ExpenseCategory {
    /// Every category.
    pub const ALL: [Self; 8] = [
        Self::Meals,
        Self::Travel,
        Self::Supplies,
        Self::TeamEvent,
        Self::Parking,
        Self::Accommodation,
        Self::Transport,
        Self::Other,
    ];

    /// Convert to database string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meals => "MEALS",
            Self::Travel => "TRAVEL",
            Self::Supplies => "SUPPLIES",
            Self::TeamEvent => "TEAM_EVENT",
            Self::Parking => "PARKING",
            Self::Accommodation => "ACCOMMODATION",
            Self::Transport => "TRANSPORT",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line-item cost belonging to one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Category.
    pub category: ExpenseCategory,
    /// Short name.
    pub expense_name: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Amount, never negative.
    pub amount: Decimal,
    /// Date the cost was incurred.
    pub expense_date: NaiveDate,
    /// Own workflow status, independent of the report's.
    pub status: ExpenseStatus,
    /// Parent report. Immutable after creation.
    pub report_id: ReportId,
    /// Attached files.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// An expense loaded together with its parent report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseWithReport {
    /// The expense.
    #[serde(flatten)]
    pub expense: Expense,
    /// Parent report, without its children.
    pub report: ReportSummary,
}

/// Input for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Category.
    pub category: ExpenseCategory,
    /// Short name.
    pub expense_name: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Amount.
    pub amount: Decimal,
    /// Date the cost was incurred.
    pub expense_date: NaiveDate,
}

/// Partial update of an expense. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    /// New category.
    pub category: Option<ExpenseCategory>,
    /// New name.
    pub expense_name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New date.
    pub expense_date: Option<NaiveDate>,
}

impl UpdateExpenseInput {
    /// Returns true if the update can affect the report total.
    #[must_use]
    pub fn changes_amount(&self) -> bool {
        self.amount.is_some()
    }

    /// Merges the provided fields into `expense`.
    pub fn apply_to(self, expense: &mut Expense) {
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(name) = self.expense_name {
            expense.expense_name = name;
        }
        if let Some(description) = self.description {
            expense.description = Some(description);
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(date) = self.expense_date {
            expense.expense_date = date;
        }
    }
}

/// Fields the expense gateway needs to insert a row.
#[derive(Debug, Clone)]
pub struct NewExpense {
    /// Parent report.
    pub report_id: ReportId,
    /// Category.
    pub category: ExpenseCategory,
    /// Short name.
    pub expense_name: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Amount.
    pub amount: Decimal,
    /// Date the cost was incurred.
    pub expense_date: NaiveDate,
    /// Initial status, always `Created`.
    pub status: ExpenseStatus,
}

impl NewExpense {
    /// Binds creation input to a report with the initial status.
    #[must_use]
    pub fn from_input(report_id: ReportId, input: CreateExpenseInput) -> Self {
        Self {
            report_id,
            category: input.category,
            expense_name: input.expense_name,
            description: input.description,
            amount: input.amount,
            expense_date: input.expense_date,
            status: ExpenseStatus::Created,
        }
    }
}
