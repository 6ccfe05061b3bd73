//! Expense report repository for database operations.
//!
//! Implements the core report gateway using SeaORM.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use expensa_core::ServiceError;
use expensa_core::expense::Expense;
use expensa_core::report::{
    ExpenseReport, NewReport, ReportQuery, ReportRepository as ReportRepoTrait, ReportSortField,
    SortOrder,
};
use expensa_shared::types::{ReportId, UserId};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use super::expense::{db_error, load_expenses};
use crate::entities::sea_orm_active_enums::ExpenseStatus as DbExpenseStatus;
use crate::entities::{attachments, expense_reports, expenses};

/// Expense report repository implementation.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Create a new report repository.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl ReportRepoTrait for ReportRepository {
    async fn create(&self, report: NewReport) -> Result<ExpenseReport, ServiceError> {
        let now = Utc::now().into();
        let active_model = expense_reports::ActiveModel {
            id: Set(ReportId::new().into_inner()),
            purpose: Set(report.purpose),
            report_date: Set(report.report_date),
            total_amount: Set(report.total_amount),
            status: Set(report.status.into()),
            payment_date: Set(None),
            user_id: Set(report.user_id.into_inner()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.db.as_ref()).await.map_err(db_error)?;
        Ok(to_domain(model, Vec::new()))
    }

    async fn find_one(
        &self,
        id: ReportId,
        user_id: Option<UserId>,
    ) -> Result<Option<ExpenseReport>, ServiceError> {
        let mut select = expense_reports::Entity::find_by_id(id.into_inner());
        if let Some(user_id) = user_id {
            select = select.filter(expense_reports::Column::UserId.eq(user_id.into_inner()));
        }

        let Some(model) = select.one(self.db.as_ref()).await.map_err(db_error)? else {
            return Ok(None);
        };

        let expenses = load_expenses(self.db.as_ref(), vec![model.id])
            .await
            .map_err(db_error)?;
        Ok(Some(to_domain(model, expenses)))
    }

    async fn find_page(
        &self,
        user_id: UserId,
        query: &ReportQuery,
    ) -> Result<(Vec<ExpenseReport>, u64), ServiceError> {
        let mut select = expense_reports::Entity::find()
            .filter(expense_reports::Column::UserId.eq(user_id.into_inner()));
        if let Some(status) = query.status {
            select = select.filter(expense_reports::Column::Status.eq(DbExpenseStatus::from(status)));
        }

        let total = select.clone().count(self.db.as_ref()).await.map_err(db_error)?;

        let models = select
            .order_by(sort_column(query.sort_by), sort_order(query.order))
            .order_by_asc(expense_reports::Column::Id)
            .offset(query.page.offset())
            .limit(query.page.take())
            .all(self.db.as_ref())
            .await
            .map_err(db_error)?;

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut by_report: HashMap<ReportId, Vec<Expense>> = HashMap::new();
        for expense in load_expenses(self.db.as_ref(), ids).await.map_err(db_error)? {
            by_report.entry(expense.report_id).or_default().push(expense);
        }

        let reports = models
            .into_iter()
            .map(|m| {
                let expenses = by_report
                    .remove(&ReportId::from_uuid(m.id))
                    .unwrap_or_default();
                to_domain(m, expenses)
            })
            .collect();
        Ok((reports, total))
    }

    async fn save(&self, report: &ExpenseReport) -> Result<ExpenseReport, ServiceError> {
        let active_model = expense_reports::ActiveModel {
            id: Unchanged(report.id.into_inner()),
            purpose: Set(report.purpose.clone()),
            report_date: Set(report.report_date),
            status: Set(report.status.into()),
            payment_date: Set(report.payment_date),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let model = active_model.update(self.db.as_ref()).await.map_err(db_error)?;
        Ok(to_domain(model, report.expenses.clone()))
    }

    async fn remove(&self, report: &ExpenseReport) -> Result<(), ServiceError> {
        let id = report.id.into_inner();
        let txn = self.db.begin().await.map_err(db_error)?;

        let expense_ids: Vec<Uuid> = expenses::Entity::find()
            .filter(expenses::Column::ReportId.eq(id))
            .select_only()
            .column(expenses::Column::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(db_error)?;

        if !expense_ids.is_empty() {
            attachments::Entity::delete_many()
                .filter(attachments::Column::ExpenseId.is_in(expense_ids))
                .exec(&txn)
                .await
                .map_err(db_error)?;
        }
        expenses::Entity::delete_many()
            .filter(expenses::Column::ReportId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_error)?;
        expense_reports::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_error)?;

        txn.commit().await.map_err(db_error)
    }

    async fn sum_expense_amounts(&self, id: ReportId) -> Result<Option<Decimal>, ServiceError> {
        let total: Option<Option<Decimal>> = expenses::Entity::find()
            .select_only()
            .column_as(expenses::Column::Amount.sum(), "total")
            .filter(expenses::Column::ReportId.eq(id.into_inner()))
            .into_tuple()
            .one(self.db.as_ref())
            .await
            .map_err(db_error)?;

        Ok(total.flatten())
    }

    async fn update_total_amount(&self, id: ReportId, total: Decimal) -> Result<u64, ServiceError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let result = expense_reports::Entity::update_many()
            .col_expr(expense_reports::Column::TotalAmount, Expr::value(total))
            .col_expr(expense_reports::Column::UpdatedAt, Expr::value(now))
            .filter(expense_reports::Column::Id.eq(id.into_inner()))
            .exec(self.db.as_ref())
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected)
    }
}

fn sort_column(field: ReportSortField) -> expense_reports::Column {
    match field {
        ReportSortField::Purpose => expense_reports::Column::Purpose,
        ReportSortField::ReportDate => expense_reports::Column::ReportDate,
        ReportSortField::TotalAmount => expense_reports::Column::TotalAmount,
        ReportSortField::Status => expense_reports::Column::Status,
        ReportSortField::PaymentDate => expense_reports::Column::PaymentDate,
        ReportSortField::CreatedAt => expense_reports::Column::CreatedAt,
        ReportSortField::UpdatedAt => expense_reports::Column::UpdatedAt,
    }
}

fn sort_order(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

/// Convert database model to domain type.
fn to_domain(model: expense_reports::Model, expenses: Vec<Expense>) -> ExpenseReport {
    ExpenseReport {
        id: ReportId::from_uuid(model.id),
        purpose: model.purpose,
        report_date: model.report_date,
        total_amount: model.total_amount,
        status: model.status.into(),
        payment_date: model.payment_date,
        user_id: UserId::from_uuid(model.user_id),
        expenses,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use expensa_core::workflow::ExpenseStatus;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    fn report_model(id: Uuid, user_id: Uuid) -> expense_reports::Model {
        let now = Utc::now().into();
        expense_reports::Model {
            id,
            purpose: "Business trip".to_string(),
            report_date: NaiveDate::from_ymd_opt(2026, 2, 11).unwrap(),
            total_amount: Decimal::ZERO,
            status: DbExpenseStatus::Created,
            payment_date: None,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_one_not_owned_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<expense_reports::Model>::new()])
            .into_connection();
        let repo = ReportRepository::new(Arc::new(db));

        let found = repo
            .find_one(ReportId::new(), Some(UserId::new()))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_one_maps_report_without_expenses() {
        let id = Uuid::now_v7();
        let user_id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![report_model(id, user_id)]])
            .append_query_results([Vec::<expenses::Model>::new()])
            .into_connection();
        let repo = ReportRepository::new(Arc::new(db));

        let report = repo
            .find_one(ReportId::from_uuid(id), Some(UserId::from_uuid(user_id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(report.purpose, "Business trip");
        assert_eq!(report.status, ExpenseStatus::Created);
        assert_eq!(report.total_amount, Decimal::ZERO);
        assert!(report.expenses.is_empty());
        assert!(report.payment_date.is_none());
    }

    #[tokio::test]
    async fn test_sum_returns_aggregate() {
        let row = BTreeMap::from([("total".to_string(), Value::from(dec!(225.50)))]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();
        let repo = ReportRepository::new(Arc::new(db));

        let total = repo.sum_expense_amounts(ReportId::new()).await.unwrap();
        assert_eq!(total, Some(dec!(225.50)));
    }

    #[tokio::test]
    async fn test_sum_over_no_rows_is_none() {
        let row = BTreeMap::from([("total".to_string(), Value::from(None::<Decimal>))]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();
        let repo = ReportRepository::new(Arc::new(db));

        let total = repo.sum_expense_amounts(ReportId::new()).await.unwrap();
        assert_eq!(total, None);
    }

    #[tokio::test]
    async fn test_update_total_reports_affected_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = ReportRepository::new(Arc::new(db));

        let affected = repo
            .update_total_amount(ReportId::new(), dec!(300.00))
            .await
            .unwrap();
        assert_eq!(affected, 1);
    }

    #[tokio::test]
    async fn test_repositories_share_one_mock_connection() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<expense_reports::Model>::new()])
                .into_connection(),
        );
        let reports = ReportRepository::new(Arc::clone(&db));
        let expenses = crate::repositories::ExpenseRepository::new(Arc::clone(&db));
        let cloned = reports.clone();
        assert_eq!(Arc::strong_count(&db), 4);

        let found = cloned.find_one(ReportId::new(), None).await.unwrap();
        assert!(found.is_none());
        drop(expenses);
        assert_eq!(Arc::strong_count(&db), 3);
    }
}
