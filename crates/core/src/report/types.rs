//! Expense report domain types.

use chrono::{DateTime, NaiveDate, Utc};
use expensa_shared::types::{PageRequest, ReportId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expense::Expense;
use crate::workflow::ExpenseStatus;

/// A container grouping expenses for one reimbursement request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReport {
    /// Report ID.
    pub id: ReportId,
    /// What the expenses were for.
    pub purpose: String,
    /// Report date.
    pub report_date: NaiveDate,
    /// Sum of the amounts of all child expenses. Derived, never client-set.
    pub total_amount: Decimal,
    /// Workflow status.
    pub status: ExpenseStatus,
    /// Set once, when the report becomes `Paid`.
    pub payment_date: Option<NaiveDate>,
    /// Owner.
    pub user_id: UserId,
    /// Child expenses, when loaded.
    #[serde(default)]
    pub expenses: Vec<Expense>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Report fields carried alongside a single expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Report ID.
    pub id: ReportId,
    /// Owner.
    pub user_id: UserId,
    /// Report status.
    pub status: ExpenseStatus,
    /// What the expenses were for.
    pub purpose: String,
}

impl From<&ExpenseReport> for ReportSummary {
    fn from(report: &ExpenseReport) -> Self {
        Self {
            id: report.id,
            user_id: report.user_id,
            status: report.status,
            purpose: report.purpose.clone(),
        }
    }
}

/// Input for creating a report.
#[derive(Debug, Clone)]
pub struct CreateReportInput {
    /// What the expenses are for.
    pub purpose: String,
    /// Report date.
    pub report_date: NaiveDate,
}

/// Partial update of a report. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateReportInput {
    /// New purpose.
    pub purpose: Option<String>,
    /// New report date.
    pub report_date: Option<NaiveDate>,
}

impl UpdateReportInput {
    /// Merges the provided fields into `report`.
    pub fn apply_to(self, report: &mut ExpenseReport) {
        if let Some(purpose) = self.purpose {
            report.purpose = purpose;
        }
        if let Some(date) = self.report_date {
            report.report_date = date;
        }
    }
}

/// Fields the report gateway needs to insert a row.
///
/// Status, total and payment date are fixed by the service, never taken
/// from client input.
#[derive(Debug, Clone)]
pub struct NewReport {
    /// Owner.
    pub user_id: UserId,
    /// What the expenses are for.
    pub purpose: String,
    /// Report date.
    pub report_date: NaiveDate,
    /// Always `Created`.
    pub status: ExpenseStatus,
    /// Always zero.
    pub total_amount: Decimal,
}

/// Column a report listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportSortField {
    /// `purpose`
    Purpose,
    /// `reportDate`
    #[default]
    ReportDate,
    /// `totalAmount`
    TotalAmount,
    /// `status`
    Status,
    /// `paymentDate`
    PaymentDate,
    /// `createdAt`
    CreatedAt,
    /// `updatedAt`
    UpdatedAt,
}

impl ReportSortField {
    /// Parses the camelCase field name used by the API.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "purpose" => Some(Self::Purpose),
            "reportDate" => Some(Self::ReportDate),
            "totalAmount" => Some(Self::TotalAmount),
            "status" => Some(Self::Status),
            "paymentDate" => Some(Self::PaymentDate),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortOrder {
    /// Parses `ASC` or `DESC`, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Filters, sorting and pagination for listing a user's reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportQuery {
    /// Page to return.
    pub page: PageRequest,
    /// Only reports in this status.
    pub status: Option<ExpenseStatus>,
    /// Sort column.
    pub sort_by: ReportSortField,
    /// Sort direction.
    pub order: SortOrder,
}
