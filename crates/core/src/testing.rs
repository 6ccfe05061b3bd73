//! In-memory gateways shared by the service tests.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};

use chrono::{NaiveDate, Utc};
use expensa_shared::types::{ExpenseId, ReportId, UserId};
use rust_decimal::Decimal;

use crate::error::ServiceError;
use crate::expense::{
    CreateExpenseInput, Expense, ExpenseCategory, ExpenseRepository, ExpenseService,
    ExpenseWithReport, NewExpense,
};
use crate::report::{
    CreateReportInput, ExpenseReport, NewReport, ReportQuery, ReportRepository, ReportService,
    ReportSortField, ReportSummary, SortOrder,
};
use crate::workflow::ExpenseStatus;

/// One store backing both gateways, like a single database would.
#[derive(Default)]
pub(crate) struct InMemoryStore {
    reports: Mutex<HashMap<ReportId, ExpenseReport>>,
    expenses: Mutex<HashMap<ExpenseId, Expense>>,
    sum_calls: AtomicUsize,
    fail_sums: AtomicBool,
}

impl InMemoryStore {
    /// Number of times the SUM aggregate ran, i.e. recalculations.
    pub(crate) fn sum_calls(&self) -> usize {
        self.sum_calls.load(AtomicOrdering::SeqCst)
    }

    /// Make every following SUM aggregate fail.
    pub(crate) fn fail_sums(&self) {
        self.fail_sums.store(true, AtomicOrdering::SeqCst);
    }

    /// Force a report status, bypassing the workflow.
    pub(crate) fn set_report_status(&self, id: ReportId, status: ExpenseStatus) {
        if let Some(report) = self.reports.lock().unwrap().get_mut(&id) {
            report.status = status;
        }
    }

    /// Force an expense status, bypassing the workflow.
    pub(crate) fn set_expense_status(&self, id: ExpenseId, status: ExpenseStatus) {
        if let Some(expense) = self.expenses.lock().unwrap().get_mut(&id) {
            expense.status = status;
        }
    }

    /// Stored total of a report.
    pub(crate) fn stored_total(&self, id: ReportId) -> Option<Decimal> {
        self.reports.lock().unwrap().get(&id).map(|r| r.total_amount)
    }

    /// Sum recomputed from scratch over the stored expenses.
    pub(crate) fn actual_sum(&self, id: ReportId) -> Decimal {
        self.expenses
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.report_id == id)
            .map(|e| e.amount)
            .sum()
    }

    /// Number of stored expenses, across all reports.
    pub(crate) fn expense_count(&self) -> usize {
        self.expenses.lock().unwrap().len()
    }

    fn expenses_of(&self, id: ReportId) -> Vec<Expense> {
        let mut expenses: Vec<Expense> = self
            .expenses
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.report_id == id)
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.expense_date.cmp(&a.expense_date));
        expenses
    }
}

/// Postgres orders enum values by declaration, not by label.
fn status_rank(status: ExpenseStatus) -> usize {
    ExpenseStatus::ALL
        .iter()
        .position(|s| *s == status)
        .unwrap_or(ExpenseStatus::ALL.len())
}

fn compare(a: &ExpenseReport, b: &ExpenseReport, field: ReportSortField) -> Ordering {
    match field {
        ReportSortField::Purpose => a.purpose.cmp(&b.purpose),
        ReportSortField::ReportDate => a.report_date.cmp(&b.report_date),
        ReportSortField::TotalAmount => a.total_amount.cmp(&b.total_amount),
        ReportSortField::Status => status_rank(a.status).cmp(&status_rank(b.status)),
        ReportSortField::PaymentDate => a.payment_date.cmp(&b.payment_date),
        ReportSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        ReportSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

impl ReportRepository for InMemoryStore {
    async fn create(&self, report: NewReport) -> Result<ExpenseReport, ServiceError> {
        let now = Utc::now();
        let report = ExpenseReport {
            id: ReportId::new(),
            purpose: report.purpose,
            report_date: report.report_date,
            total_amount: report.total_amount,
            status: report.status,
            payment_date: None,
            user_id: report.user_id,
            expenses: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.reports
            .lock()
            .unwrap()
            .insert(report.id, report.clone());
        Ok(report)
    }

    async fn find_one(
        &self,
        id: ReportId,
        user_id: Option<UserId>,
    ) -> Result<Option<ExpenseReport>, ServiceError> {
        let report = self
            .reports
            .lock()
            .unwrap()
            .get(&id)
            .filter(|r| user_id.is_none_or(|u| r.user_id == u))
            .cloned();
        Ok(report.map(|mut r| {
            r.expenses = self.expenses_of(r.id);
            r
        }))
    }

    async fn find_page(
        &self,
        user_id: UserId,
        query: &ReportQuery,
    ) -> Result<(Vec<ExpenseReport>, u64), ServiceError> {
        let mut matching: Vec<ExpenseReport> = self
            .reports
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.user_id == user_id)
            .filter(|r| query.status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            let ord = compare(a, b, query.sort_by);
            match query.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(query.page.offset()).unwrap())
            .take(usize::try_from(query.page.take()).unwrap())
            .map(|mut r| {
                r.expenses = self.expenses_of(r.id);
                r
            })
            .collect();
        Ok((page, total))
    }

    async fn save(&self, report: &ExpenseReport) -> Result<ExpenseReport, ServiceError> {
        let mut reports = self.reports.lock().unwrap();
        let stored = reports
            .get_mut(&report.id)
            .ok_or_else(|| ServiceError::repository("report vanished"))?;
        stored.purpose.clone_from(&report.purpose);
        stored.report_date = report.report_date;
        stored.status = report.status;
        stored.payment_date = report.payment_date;
        stored.updated_at = Utc::now();
        let mut saved = stored.clone();
        saved.expenses.clone_from(&report.expenses);
        Ok(saved)
    }

    async fn remove(&self, report: &ExpenseReport) -> Result<(), ServiceError> {
        self.expenses
            .lock()
            .unwrap()
            .retain(|_, e| e.report_id != report.id);
        self.reports.lock().unwrap().remove(&report.id);
        Ok(())
    }

    async fn sum_expense_amounts(&self, id: ReportId) -> Result<Option<Decimal>, ServiceError> {
        self.sum_calls.fetch_add(1, AtomicOrdering::SeqCst);
        if self.fail_sums.load(AtomicOrdering::SeqCst) {
            return Err(ServiceError::repository("sum query failed"));
        }
        let amounts: Vec<Decimal> = self
            .expenses
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.report_id == id)
            .map(|e| e.amount)
            .collect();
        if amounts.is_empty() {
            Ok(None)
        } else {
            Ok(Some(amounts.into_iter().sum()))
        }
    }

    async fn update_total_amount(&self, id: ReportId, total: Decimal) -> Result<u64, ServiceError> {
        match self.reports.lock().unwrap().get_mut(&id) {
            Some(report) => {
                report.total_amount = total;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

impl ExpenseRepository for InMemoryStore {
    async fn create(&self, expense: NewExpense) -> Result<Expense, ServiceError> {
        let now = Utc::now();
        let expense = Expense {
            id: ExpenseId::new(),
            category: expense.category,
            expense_name: expense.expense_name,
            description: expense.description,
            amount: expense.amount,
            expense_date: expense.expense_date,
            status: expense.status,
            report_id: expense.report_id,
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.expenses
            .lock()
            .unwrap()
            .insert(expense.id, expense.clone());
        Ok(expense)
    }

    async fn find_by_report(&self, report_id: ReportId) -> Result<Vec<Expense>, ServiceError> {
        Ok(self.expenses_of(report_id))
    }

    async fn find_one(&self, id: ExpenseId) -> Result<Option<ExpenseWithReport>, ServiceError> {
        let Some(expense) = self.expenses.lock().unwrap().get(&id).cloned() else {
            return Ok(None);
        };
        let reports = self.reports.lock().unwrap();
        let report = reports
            .get(&expense.report_id)
            .ok_or_else(|| ServiceError::repository("orphan expense"))?;
        Ok(Some(ExpenseWithReport {
            report: ReportSummary::from(report),
            expense,
        }))
    }

    async fn save(&self, expense: &Expense) -> Result<Expense, ServiceError> {
        let mut saved = expense.clone();
        saved.updated_at = Utc::now();
        self.expenses
            .lock()
            .unwrap()
            .insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn remove(&self, expense: &Expense) -> Result<(), ServiceError> {
        self.expenses.lock().unwrap().remove(&expense.id);
        Ok(())
    }
}

/// Services wired to one shared in-memory store.
pub(crate) struct Fixture {
    pub(crate) store: Arc<InMemoryStore>,
    pub(crate) reports: Arc<ReportService<InMemoryStore>>,
    pub(crate) expenses: ExpenseService<InMemoryStore, InMemoryStore>,
    pub(crate) user: UserId,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let reports = Arc::new(ReportService::new(Arc::clone(&store)));
        let expenses = ExpenseService::new(Arc::clone(&store), Arc::clone(&reports));
        Self {
            store,
            reports,
            expenses,
            user: UserId::new(),
        }
    }

    pub(crate) async fn report(&self, purpose: &str) -> ExpenseReport {
        self.reports
            .create(
                self.user,
                CreateReportInput {
                    purpose: purpose.to_string(),
                    report_date: date(2026, 2, 11),
                },
            )
            .await
            .unwrap()
    }

    pub(crate) async fn expense(&self, report_id: ReportId, amount: Decimal) -> Expense {
        self.expenses
            .create(report_id, self.user, expense_input(amount))
            .await
            .unwrap()
    }
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn expense_input(amount: Decimal) -> CreateExpenseInput {
    CreateExpenseInput {
        category: ExpenseCategory::Travel,
        expense_name: "Train ticket".to_string(),
        description: None,
        amount,
        expense_date: date(2026, 2, 10),
    }
}
