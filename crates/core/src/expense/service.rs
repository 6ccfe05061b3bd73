//! Expense service implementation.

use std::sync::Arc;

use expensa_shared::types::{ExpenseId, ReportId, UserId};
use tracing::{info, warn};

use super::types::{CreateExpenseInput, Expense, ExpenseWithReport, NewExpense, UpdateExpenseInput};
use crate::error::{Operation, ServiceError};
use crate::report::{ReportRepository, ReportService, ensure_report_modifiable};
use crate::workflow::{ExpenseStatus, WorkflowService};

/// Repository trait for expense persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait ExpenseRepository: Send + Sync {
    /// Insert a new expense.
    fn create(
        &self,
        expense: NewExpense,
    ) -> impl std::future::Future<Output = Result<Expense, ServiceError>> + Send;

    /// All expenses of a report with attachments, newest `expense_date` first.
    fn find_by_report(
        &self,
        report_id: ReportId,
    ) -> impl std::future::Future<Output = Result<Vec<Expense>, ServiceError>> + Send;

    /// Find an expense with its parent report and attachments.
    fn find_one(
        &self,
        id: ExpenseId,
    ) -> impl std::future::Future<Output = Result<Option<ExpenseWithReport>, ServiceError>> + Send;

    /// Persist the editable fields and status.
    fn save(
        &self,
        expense: &Expense,
    ) -> impl std::future::Future<Output = Result<Expense, ServiceError>> + Send;

    /// Delete an expense together with its attachments.
    fn remove(
        &self,
        expense: &Expense,
    ) -> impl std::future::Future<Output = Result<(), ServiceError>> + Send;
}

/// Owns the expense lifecycle, nested under reports.
///
/// Every entry point authorizes through the owning report, and every
/// create, amount change or delete ends with a report total recalculation.
/// A recalculation failure is returned to the caller even though the
/// expense write itself has already been committed.
pub struct ExpenseService<E: ExpenseRepository, R: ReportRepository> {
    repo: Arc<E>,
    reports: Arc<ReportService<R>>,
}

impl<E: ExpenseRepository, R: ReportRepository> ExpenseService<E, R> {
    /// Create a new expense service.
    #[must_use]
    pub fn new(repo: Arc<E>, reports: Arc<ReportService<R>>) -> Self {
        Self { repo, reports }
    }

    /// Add an expense to one of the caller's reports.
    ///
    /// # Errors
    ///
    /// Returns `ReportNotFound`, `ReportLocked` when the report has been
    /// reviewed, or a repository error from the insert or the recalculation.
    pub async fn create(
        &self,
        report_id: ReportId,
        user_id: UserId,
        input: CreateExpenseInput,
    ) -> Result<Expense, ServiceError> {
        let report = self.reports.find_one(report_id, user_id).await?;
        ensure_report_modifiable(&report, Operation::AddExpense)?;

        let expense = self
            .repo
            .create(NewExpense::from_input(report_id, input))
            .await?;
        info!(
            expense_id = %expense.id,
            report_id = %report_id,
            user_id = %user_id,
            amount = %expense.amount,
            "Expense created"
        );

        self.reports.recalculate_total_amount(report_id).await?;
        Ok(expense)
    }

    /// All expenses of one of the caller's reports.
    ///
    /// # Errors
    ///
    /// Returns `ReportNotFound` or a repository error.
    pub async fn find_all_by_report(
        &self,
        report_id: ReportId,
        user_id: UserId,
    ) -> Result<Vec<Expense>, ServiceError> {
        self.reports.find_one(report_id, user_id).await?;
        self.repo.find_by_report(report_id).await
    }

    /// Fetch an expense whose report belongs to the caller.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseNotFound` if the expense does not exist or its report
    /// belongs to someone else.
    pub async fn find_one(
        &self,
        id: ExpenseId,
        user_id: UserId,
    ) -> Result<ExpenseWithReport, ServiceError> {
        match self.repo.find_one(id).await? {
            Some(found) if found.report.user_id == user_id => Ok(found),
            _ => Err(ServiceError::ExpenseNotFound(id)),
        }
    }

    /// Edit an expense. Recalculates the report total when `amount` is given.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseNotFound`, `ExpenseLocked` when either the expense or
    /// its report has been reviewed, or a repository error.
    pub async fn update(
        &self,
        id: ExpenseId,
        user_id: UserId,
        input: UpdateExpenseInput,
    ) -> Result<Expense, ServiceError> {
        let found = self.find_one(id, user_id).await?;
        ensure_expense_modifiable(&found, Operation::Modify)?;

        let recalculate = input.changes_amount();
        let mut expense = found.expense;
        input.apply_to(&mut expense);
        let saved = self.repo.save(&expense).await?;
        info!(expense_id = %id, user_id = %user_id, "Expense updated");

        if recalculate {
            self.reports
                .recalculate_total_amount(saved.report_id)
                .await?;
        }
        Ok(saved)
    }

    /// Move the expense to `target`.
    ///
    /// Only the expense's own transition is checked; the report status does
    /// not gate it.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseNotFound` or `Workflow` for an illegal transition.
    pub async fn update_status(
        &self,
        id: ExpenseId,
        user_id: UserId,
        target: ExpenseStatus,
    ) -> Result<Expense, ServiceError> {
        let mut expense = self.find_one(id, user_id).await?.expense;
        WorkflowService::validate_transition(expense.status, target)?;

        let from = expense.status;
        expense.status = target;
        let saved = self.repo.save(&expense).await?;

        info!(
            expense_id = %id,
            user_id = %user_id,
            from = %from,
            to = %target,
            "Expense status changed"
        );
        Ok(saved)
    }

    /// Delete an expense and recalculate its former report's total.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseNotFound`, `ExpenseLocked`, or a repository error.
    pub async fn remove(&self, id: ExpenseId, user_id: UserId) -> Result<(), ServiceError> {
        let found = self.find_one(id, user_id).await?;
        ensure_expense_modifiable(&found, Operation::Delete)?;

        let report_id = found.expense.report_id;
        self.repo.remove(&found.expense).await?;
        info!(expense_id = %id, report_id = %report_id, user_id = %user_id, "Expense deleted");

        self.reports.recalculate_total_amount(report_id).await?;
        Ok(())
    }
}

/// Both the expense and its report must be modifiable.
fn ensure_expense_modifiable(
    found: &ExpenseWithReport,
    operation: Operation,
) -> Result<(), ServiceError> {
    let status = found.expense.status;
    let report_status = found.report.status;
    if WorkflowService::is_modifiable(status) && WorkflowService::is_modifiable(report_status) {
        return Ok(());
    }
    warn!(
        expense_id = %found.expense.id,
        status = %status,
        report_status = %report_status,
        operation = %operation,
        "Refused operation on locked expense"
    );
    Err(ServiceError::ExpenseLocked {
        id: found.expense.id,
        status,
        report_status,
        operation,
    })
}
