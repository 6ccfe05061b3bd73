//! Expense report routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch},
};
use chrono::NaiveDate;
use expensa_core::report::{
    CreateReportInput, ExpenseReport, ReportQuery, ReportSortField, SortOrder, UpdateReportInput,
};
use expensa_core::workflow::ExpenseStatus;
use expensa_shared::types::{PageRequest, PageResponse, ReportId};
use serde::Deserialize;
use validator::Validate;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{ApiPath, ApiQuery, ValidatedJson};
use crate::middleware::AuthUser;

/// Request body for creating a report.
///
/// Status, total and payment date are not accepted; unknown fields are ignored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    /// What the expenses are for.
    #[validate(length(min = 1, max = 500, message = "must be 1 to 500 characters"))]
    pub purpose: String,
    /// Report date, `YYYY-MM-DD`.
    pub report_date: NaiveDate,
}

impl From<CreateReportRequest> for CreateReportInput {
    fn from(req: CreateReportRequest) -> Self {
        Self {
            purpose: req.purpose,
            report_date: req.report_date,
        }
    }
}

/// Request body for editing a report.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportRequest {
    /// New purpose.
    #[validate(length(min = 1, max = 500, message = "must be 1 to 500 characters"))]
    pub purpose: Option<String>,
    /// New report date.
    pub report_date: Option<NaiveDate>,
}

impl From<UpdateReportRequest> for UpdateReportInput {
    fn from(req: UpdateReportRequest) -> Self {
        Self {
            purpose: req.purpose,
            report_date: req.report_date,
        }
    }
}

/// Request body for a status change, shared by reports and expenses.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    /// Target status.
    pub status: ExpenseStatus,
}

/// Query parameters for listing reports.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReportsParams {
    /// Page number, 1-based.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Only reports in this status.
    pub status: Option<ExpenseStatus>,
    /// Sort column, camelCase field name.
    pub sort_by: Option<String>,
    /// `ASC` or `DESC`.
    pub order: Option<String>,
}

impl TryFrom<ListReportsParams> for ReportQuery {
    type Error = ApiError;

    fn try_from(params: ListReportsParams) -> Result<Self, Self::Error> {
        let defaults = PageRequest::default();
        let sort_by = match params.sort_by.as_deref() {
            None => ReportSortField::default(),
            Some(field) => ReportSortField::parse(field)
                .ok_or_else(|| ApiError::validation(format!("sortBy: unknown field '{field}'")))?,
        };
        let order = match params.order.as_deref() {
            None => SortOrder::default(),
            Some(order) => SortOrder::parse(order)
                .ok_or_else(|| ApiError::validation(format!("order: must be ASC or DESC, got '{order}'")))?,
        };

        Ok(Self {
            page: PageRequest {
                page: params.page.unwrap_or(defaults.page),
                limit: params.limit.unwrap_or(defaults.limit),
            },
            status: params.status,
            sort_by,
            order,
        })
    }
}

/// Creates expense report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expense-reports", get(list_reports).post(create_report))
        .route(
            "/expense-reports/{id}",
            get(get_report).patch(update_report).delete(delete_report),
        )
        .route("/expense-reports/{id}/status", patch(update_report_status))
}

/// POST /expense-reports
async fn create_report(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateReportRequest>,
) -> ApiResult<(StatusCode, Json<ExpenseReport>)> {
    let report = state.reports.create(auth.user_id(), payload.into()).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /expense-reports
async fn list_reports(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<ListReportsParams>,
) -> ApiResult<Json<PageResponse<ExpenseReport>>> {
    let query = ReportQuery::try_from(params)?;
    let page = state.reports.find_all(auth.user_id(), query).await?;
    Ok(Json(page))
}

/// GET /expense-reports/{id}
async fn get_report(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<ReportId>,
) -> ApiResult<Json<ExpenseReport>> {
    Ok(Json(state.reports.find_one(id, auth.user_id()).await?))
}

/// PATCH /expense-reports/{id}
async fn update_report(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<ReportId>,
    ValidatedJson(payload): ValidatedJson<UpdateReportRequest>,
) -> ApiResult<Json<ExpenseReport>> {
    let report = state
        .reports
        .update(id, auth.user_id(), payload.into())
        .await?;
    Ok(Json(report))
}

/// PATCH /expense-reports/{id}/status
async fn update_report_status(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<ReportId>,
    ValidatedJson(payload): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<ExpenseReport>> {
    let report = state
        .reports
        .update_status(id, auth.user_id(), payload.status)
        .await?;
    Ok(Json(report))
}

/// DELETE /expense-reports/{id}
async fn delete_report(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<ReportId>,
) -> ApiResult<StatusCode> {
    state.reports.remove(id, auth.user_id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
