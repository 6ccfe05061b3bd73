//! Report service implementation.

use std::sync::Arc;

use chrono::Utc;
use expensa_shared::types::{PageResponse, ReportId, UserId};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::types::{CreateReportInput, ExpenseReport, NewReport, ReportQuery, UpdateReportInput};
use crate::error::{Operation, ServiceError};
use crate::workflow::{ExpenseStatus, WorkflowService};

/// Repository trait for report persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait ReportRepository: Send + Sync {
    /// Insert a new report.
    fn create(
        &self,
        report: NewReport,
    ) -> impl std::future::Future<Output = Result<ExpenseReport, ServiceError>> + Send;

    /// Find a report by ID, restricted to `user_id` when given.
    ///
    /// Expenses and their attachments are loaded eagerly.
    fn find_one(
        &self,
        id: ReportId,
        user_id: Option<UserId>,
    ) -> impl std::future::Future<Output = Result<Option<ExpenseReport>, ServiceError>> + Send;

    /// List one page of a user's reports and the total number of matches.
    fn find_page(
        &self,
        user_id: UserId,
        query: &ReportQuery,
    ) -> impl std::future::Future<Output = Result<(Vec<ExpenseReport>, u64), ServiceError>> + Send;

    /// Persist the editable fields, status and payment date.
    ///
    /// `total_amount` is left alone; only `update_total_amount` writes it.
    fn save(
        &self,
        report: &ExpenseReport,
    ) -> impl std::future::Future<Output = Result<ExpenseReport, ServiceError>> + Send;

    /// Delete a report together with its expenses and their attachments.
    fn remove(
        &self,
        report: &ExpenseReport,
    ) -> impl std::future::Future<Output = Result<(), ServiceError>> + Send;

    /// Sum of the amounts of the report's expenses, `None` when it has none.
    fn sum_expense_amounts(
        &self,
        id: ReportId,
    ) -> impl std::future::Future<Output = Result<Option<Decimal>, ServiceError>> + Send;

    /// Overwrite the stored total. Returns the number of affected rows.
    fn update_total_amount(
        &self,
        id: ReportId,
        total: Decimal,
    ) -> impl std::future::Future<Output = Result<u64, ServiceError>> + Send;
}

/// Owns the expense report lifecycle.
pub struct ReportService<R: ReportRepository> {
    repo: Arc<R>,
}

impl<R: ReportRepository> ReportService<R> {
    /// Create a new report service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a report for `user_id` in status `Created` with a zero total.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn create(
        &self,
        user_id: UserId,
        input: CreateReportInput,
    ) -> Result<ExpenseReport, ServiceError> {
        let report = self
            .repo
            .create(NewReport {
                user_id,
                purpose: input.purpose,
                report_date: input.report_date,
                status: ExpenseStatus::Created,
                total_amount: Decimal::ZERO,
            })
            .await?;

        info!(report_id = %report.id, user_id = %user_id, "Expense report created");
        Ok(report)
    }

    /// List the caller's reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn find_all(
        &self,
        user_id: UserId,
        query: ReportQuery,
    ) -> Result<PageResponse<ExpenseReport>, ServiceError> {
        let query = ReportQuery {
            page: query.page.normalized(),
            ..query
        };
        let (data, total) = self.repo.find_page(user_id, &query).await?;
        Ok(PageResponse::new(data, query.page, total))
    }

    /// Fetch one of the caller's reports with its expenses.
    ///
    /// # Errors
    ///
    /// Returns `ReportNotFound` if the report does not exist or belongs to
    /// someone else.
    pub async fn find_one(
        &self,
        id: ReportId,
        user_id: UserId,
    ) -> Result<ExpenseReport, ServiceError> {
        self.repo
            .find_one(id, Some(user_id))
            .await?
            .ok_or(ServiceError::ReportNotFound(id))
    }

    /// Edit purpose and/or report date.
    ///
    /// # Errors
    ///
    /// Returns `ReportNotFound`, or `ReportLocked` once the report has been
    /// reviewed.
    pub async fn update(
        &self,
        id: ReportId,
        user_id: UserId,
        input: UpdateReportInput,
    ) -> Result<ExpenseReport, ServiceError> {
        let mut report = self.find_one(id, user_id).await?;
        ensure_report_modifiable(&report, Operation::Modify)?;

        input.apply_to(&mut report);
        let saved = self.repo.save(&report).await?;

        info!(report_id = %id, user_id = %user_id, "Expense report updated");
        Ok(saved)
    }

    /// Move the report to `target`.
    ///
    /// Submitting requires at least one expense. Paying stamps the payment
    /// date with today's date.
    ///
    /// # Errors
    ///
    /// Returns `ReportNotFound`, `Workflow` for an illegal transition, or
    /// `EmptySubmission`.
    pub async fn update_status(
        &self,
        id: ReportId,
        user_id: UserId,
        target: ExpenseStatus,
    ) -> Result<ExpenseReport, ServiceError> {
        let mut report = self.find_one(id, user_id).await?;
        WorkflowService::validate_transition(report.status, target)?;

        if target == ExpenseStatus::Submitted && report.expenses.is_empty() {
            warn!(report_id = %id, "Refused to submit report without expenses");
            return Err(ServiceError::EmptySubmission(id));
        }

        let from = report.status;
        report.status = target;
        if target == ExpenseStatus::Paid {
            report.payment_date = Some(Utc::now().date_naive());
        }
        let saved = self.repo.save(&report).await?;

        info!(
            report_id = %id,
            user_id = %user_id,
            from = %from,
            to = %target,
            "Expense report status changed"
        );
        Ok(saved)
    }

    /// Delete the report with its expenses and attachments.
    ///
    /// # Errors
    ///
    /// Returns `ReportNotFound`, or `ReportLocked` once the report has been
    /// reviewed.
    pub async fn remove(&self, id: ReportId, user_id: UserId) -> Result<(), ServiceError> {
        let report = self.find_one(id, user_id).await?;
        ensure_report_modifiable(&report, Operation::Delete)?;

        self.repo.remove(&report).await?;

        info!(report_id = %id, user_id = %user_id, "Expense report deleted");
        Ok(())
    }

    /// Recompute the report total from its current expenses and store it.
    ///
    /// No ownership or status check: the total must stay accurate in every
    /// status.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn recalculate_total_amount(&self, id: ReportId) -> Result<Decimal, ServiceError> {
        let total = self
            .repo
            .sum_expense_amounts(id)
            .await?
            .unwrap_or(Decimal::ZERO);
        self.repo.update_total_amount(id, total).await?;

        info!(report_id = %id, total = %total, "Expense report total recalculated");
        Ok(total)
    }
}

/// Refuse `operation` unless the report is still modifiable.
pub(crate) fn ensure_report_modifiable(
    report: &ExpenseReport,
    operation: Operation,
) -> Result<(), ServiceError> {
    if WorkflowService::is_modifiable(report.status) {
        return Ok(());
    }
    warn!(
        report_id = %report.id,
        status = %report.status,
        operation = %operation,
        "Refused operation on locked report"
    );
    Err(ServiceError::ReportLocked {
        id: report.id,
        status: report.status,
        operation,
    })
}
