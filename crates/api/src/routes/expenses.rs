//! Expense routes, including the ones nested under a report.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch},
};
use chrono::NaiveDate;
use expensa_core::expense::{
    CreateExpenseInput, Expense, ExpenseCategory, ExpenseWithReport, UpdateExpenseInput,
};
use expensa_shared::types::{ExpenseId, ReportId};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::expense_reports::UpdateStatusRequest;
use crate::AppState;
use crate::error::ApiResult;
use crate::extractors::{ApiPath, ValidatedJson};
use crate::middleware::AuthUser;

/// Largest amount an expense row can hold, `NUMERIC(10, 2)`.
const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

fn valid_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::new("range").with_message("must not be negative".into()));
    }
    if *amount > MAX_AMOUNT {
        return Err(ValidationError::new("range")
            .with_message("must be at most 99999999.99".into()));
    }
    if amount.normalize().scale() > 2 {
        return Err(ValidationError::new("scale")
            .with_message("must have at most 2 decimal places".into()));
    }
    Ok(())
}

/// Request body for adding an expense to a report.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    /// Category.
    pub category: ExpenseCategory,
    /// Short name.
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub expense_name: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Amount, between zero and 99999999.99 with at most 2 decimals.
    #[validate(custom(function = "valid_amount"))]
    pub amount: Decimal,
    /// Date the cost was incurred, `YYYY-MM-DD`.
    pub expense_date: NaiveDate,
}

impl From<CreateExpenseRequest> for CreateExpenseInput {
    fn from(req: CreateExpenseRequest) -> Self {
        Self {
            category: req.category,
            expense_name: req.expense_name,
            description: req.description,
            amount: req.amount,
            expense_date: req.expense_date,
        }
    }
}

/// Request body for editing an expense.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    /// New category.
    pub category: Option<ExpenseCategory>,
    /// New name.
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub expense_name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New amount.
    #[validate(custom(function = "valid_amount"))]
    pub amount: Option<Decimal>,
    /// New date.
    pub expense_date: Option<NaiveDate>,
}

impl From<UpdateExpenseRequest> for UpdateExpenseInput {
    fn from(req: UpdateExpenseRequest) -> Self {
        Self {
            category: req.category,
            expense_name: req.expense_name,
            description: req.description,
            amount: req.amount,
            expense_date: req.expense_date,
        }
    }
}

/// Creates expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/expense-reports/{report_id}/expenses",
            get(list_expenses).post(create_expense),
        )
        .route(
            "/expenses/{id}",
            get(get_expense).patch(update_expense).delete(delete_expense),
        )
        .route("/expenses/{id}/status", patch(update_expense_status))
}

/// POST /expense-reports/{report_id}/expenses
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(report_id): ApiPath<ReportId>,
    ValidatedJson(payload): ValidatedJson<CreateExpenseRequest>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let expense = state
        .expenses
        .create(report_id, auth.user_id(), payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET /expense-reports/{report_id}/expenses
async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(report_id): ApiPath<ReportId>,
) -> ApiResult<Json<Vec<Expense>>> {
    let expenses = state
        .expenses
        .find_all_by_report(report_id, auth.user_id())
        .await?;
    Ok(Json(expenses))
}

/// GET /expenses/{id}
async fn get_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<ExpenseId>,
) -> ApiResult<Json<ExpenseWithReport>> {
    Ok(Json(state.expenses.find_one(id, auth.user_id()).await?))
}

/// PATCH /expenses/{id}
async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<ExpenseId>,
    ValidatedJson(payload): ValidatedJson<UpdateExpenseRequest>,
) -> ApiResult<Json<Expense>> {
    let expense = state
        .expenses
        .update(id, auth.user_id(), payload.into())
        .await?;
    Ok(Json(expense))
}

/// PATCH /expenses/{id}/status
async fn update_expense_status(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<ExpenseId>,
    ValidatedJson(payload): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<Expense>> {
    let expense = state
        .expenses
        .update_status(id, auth.user_id(), payload.status)
        .await?;
    Ok(Json(expense))
}

/// DELETE /expenses/{id}
async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<ExpenseId>,
) -> ApiResult<StatusCode> {
    state.expenses.remove(id, auth.user_id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
