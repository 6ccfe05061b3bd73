//! Expense repository for database operations.
//!
//! Implements the core expense gateway using SeaORM.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use expensa_core::ServiceError;
use expensa_core::attachment::Attachment;
use expensa_core::expense::{
    Expense, ExpenseRepository as ExpenseRepoTrait, ExpenseWithReport, NewExpense,
};
use expensa_core::report::ReportSummary;
use expensa_shared::types::{AttachmentId, ExpenseId, ReportId, UserId};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::error;
use uuid::Uuid;

use crate::entities::{attachments, expense_reports, expenses};

/// Expense repository implementation.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: Arc<DatabaseConnection>,
}

impl ExpenseRepository {
    /// Create a new expense repository.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl ExpenseRepoTrait for ExpenseRepository {
    async fn create(&self, expense: NewExpense) -> Result<Expense, ServiceError> {
        let now = Utc::now().into();
        let active_model = expenses::ActiveModel {
            id: Set(ExpenseId::new().into_inner()),
            category: Set(expense.category.into()),
            expense_name: Set(expense.expense_name),
            description: Set(expense.description),
            amount: Set(expense.amount),
            expense_date: Set(expense.expense_date),
            status: Set(expense.status.into()),
            report_id: Set(expense.report_id.into_inner()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.db.as_ref()).await.map_err(db_error)?;
        Ok(to_domain(model, Vec::new()))
    }

    async fn find_by_report(&self, report_id: ReportId) -> Result<Vec<Expense>, ServiceError> {
        load_expenses(self.db.as_ref(), vec![report_id.into_inner()])
            .await
            .map_err(db_error)
    }

    async fn find_one(&self, id: ExpenseId) -> Result<Option<ExpenseWithReport>, ServiceError> {
        let found = expenses::Entity::find_by_id(id.into_inner())
            .find_also_related(expense_reports::Entity)
            .one(self.db.as_ref())
            .await
            .map_err(db_error)?;

        let Some((model, Some(report))) = found else {
            return Ok(None);
        };

        let mut attachments = load_attachments(self.db.as_ref(), vec![model.id])
            .await
            .map_err(db_error)?;
        let expense = to_domain(model, attachments.remove(&id.into_inner()).unwrap_or_default());

        Ok(Some(ExpenseWithReport {
            expense,
            report: ReportSummary {
                id: ReportId::from_uuid(report.id),
                user_id: UserId::from_uuid(report.user_id),
                status: report.status.into(),
                purpose: report.purpose,
            },
        }))
    }

    async fn save(&self, expense: &Expense) -> Result<Expense, ServiceError> {
        let active_model = expenses::ActiveModel {
            id: Unchanged(expense.id.into_inner()),
            category: Set(expense.category.into()),
            expense_name: Set(expense.expense_name.clone()),
            description: Set(expense.description.clone()),
            amount: Set(expense.amount),
            expense_date: Set(expense.expense_date),
            status: Set(expense.status.into()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let model = active_model.update(self.db.as_ref()).await.map_err(db_error)?;
        Ok(to_domain(model, expense.attachments.clone()))
    }

    async fn remove(&self, expense: &Expense) -> Result<(), ServiceError> {
        let id = expense.id.into_inner();
        let txn = self.db.begin().await.map_err(db_error)?;

        attachments::Entity::delete_many()
            .filter(attachments::Column::ExpenseId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_error)?;
        expenses::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_error)?;

        txn.commit().await.map_err(db_error)
    }
}

/// Load the expenses of the given reports with their attachments,
/// newest `expense_date` first.
pub(crate) async fn load_expenses<C: ConnectionTrait>(
    db: &C,
    report_ids: Vec<Uuid>,
) -> Result<Vec<Expense>, DbErr> {
    if report_ids.is_empty() {
        return Ok(Vec::new());
    }

    let models = expenses::Entity::find()
        .filter(expenses::Column::ReportId.is_in(report_ids))
        .order_by_desc(expenses::Column::ExpenseDate)
        .order_by_asc(expenses::Column::CreatedAt)
        .all(db)
        .await?;

    let mut attachments = load_attachments(db, models.iter().map(|m| m.id).collect()).await?;

    Ok(models
        .into_iter()
        .map(|m| {
            let files = attachments.remove(&m.id).unwrap_or_default();
            to_domain(m, files)
        })
        .collect())
}

/// Attachments of the given expenses, keyed by expense.
async fn load_attachments<C: ConnectionTrait>(
    db: &C,
    expense_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, Vec<Attachment>>, DbErr> {
    if expense_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let models = attachments::Entity::find()
        .filter(attachments::Column::ExpenseId.is_in(expense_ids))
        .order_by_asc(attachments::Column::CreatedAt)
        .all(db)
        .await?;

    let mut grouped: HashMap<Uuid, Vec<Attachment>> = HashMap::new();
    for model in models {
        grouped
            .entry(model.expense_id)
            .or_default()
            .push(to_attachment(model));
    }
    Ok(grouped)
}

/// Log a driver error and wrap it for the service layer.
pub(crate) fn db_error(err: DbErr) -> ServiceError {
    error!(error = %err, "Database operation failed");
    ServiceError::repository(err.to_string())
}

/// Convert database model to domain type.
fn to_domain(model: expenses::Model, attachments: Vec<Attachment>) -> Expense {
    Expense {
        id: ExpenseId::from_uuid(model.id),
        category: model.category.into(),
        expense_name: model.expense_name,
        description: model.description,
        amount: model.amount,
        expense_date: model.expense_date,
        status: model.status.into(),
        report_id: ReportId::from_uuid(model.report_id),
        attachments,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}

fn to_attachment(model: attachments::Model) -> Attachment {
    Attachment {
        id: AttachmentId::from_uuid(model.id),
        file_name: model.file_name,
        file_path: model.file_path,
        mime_type: model.mime_type,
        size: i64::from(model.size),
        expense_id: ExpenseId::from_uuid(model.expense_id),
        created_at: model.created_at.into(),
    }
}
