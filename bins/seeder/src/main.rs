//! Database seeder for Expensa development and testing.
//!
//! Seeds the placeholder employee and one demo report with two expenses.
//! The expenses go through the services, so the report total is computed
//! the same way the API computes it. Safe to run repeatedly.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use expensa_core::expense::{CreateExpenseInput, ExpenseCategory, ExpenseService};
use expensa_core::report::{CreateReportInput, ReportService};
use expensa_db::entities::expense_reports;
use expensa_db::{ExpenseRepository, NewUser, ReportRepository, UserRepository, UserRole};
use expensa_shared::config::{DatabaseConfig, PLACEHOLDER_USER_ID};
use expensa_shared::types::UserId;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

/// Purpose of the demo report, used to detect an earlier run.
const DEMO_PURPOSE: &str = "Client visit in Lyon";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = expensa_db::connect(&DatabaseConfig::with_url(database_url))
        .await
        .map(Arc::new)
        .context("Failed to connect to database")?;

    println!("Seeding placeholder employee...");
    seed_employee(&db).await?;

    println!("Seeding demo expense report...");
    seed_demo_report(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

/// Seeds the user every request runs as.
async fn seed_employee(db: &Arc<DatabaseConnection>) -> anyhow::Result<()> {
    let users = UserRepository::new(Arc::clone(db));

    if users.find_by_id(PLACEHOLDER_USER_ID).await?.is_some() {
        println!("  Placeholder employee already exists, skipping...");
        return Ok(());
    }

    users
        .create_with_id(
            PLACEHOLDER_USER_ID,
            NewUser {
                email: "employee@example.com".to_string(),
                name: "Test Employee".to_string(),
                role: UserRole::Employee,
                manager_id: None,
            },
        )
        .await?;
    println!("  Created placeholder employee: employee@example.com");
    Ok(())
}

async fn demo_report_exists(db: &DatabaseConnection) -> Result<bool, DbErr> {
    let existing = expense_reports::Entity::find()
        .filter(expense_reports::Column::UserId.eq(PLACEHOLDER_USER_ID))
        .filter(expense_reports::Column::Purpose.eq(DEMO_PURPOSE))
        .one(db)
        .await?;
    Ok(existing.is_some())
}

/// Seeds a report with two expenses for the placeholder employee.
async fn seed_demo_report(db: &Arc<DatabaseConnection>) -> anyhow::Result<()> {
    let user_id = UserId::from_uuid(PLACEHOLDER_USER_ID);
    let reports = Arc::new(ReportService::new(Arc::new(ReportRepository::new(
        Arc::clone(db),
    ))));
    let expenses = ExpenseService::new(
        Arc::new(ExpenseRepository::new(Arc::clone(db))),
        Arc::clone(&reports),
    );

    if demo_report_exists(db.as_ref()).await? {
        println!("  Demo report already exists, skipping...");
        return Ok(());
    }

    let report = reports
        .create(
            user_id,
            CreateReportInput {
                purpose: DEMO_PURPOSE.to_string(),
                report_date: date(2026, 2, 11)?,
            },
        )
        .await?;

    let items = [
        (ExpenseCategory::Travel, "Train ticket", Decimal::new(12550, 2), date(2026, 2, 9)?),
        (ExpenseCategory::Meals, "Team dinner", Decimal::new(10000, 2), date(2026, 2, 10)?),
    ];
    for (category, name, amount, expense_date) in items {
        expenses
            .create(
                report.id,
                user_id,
                CreateExpenseInput {
                    category,
                    expense_name: name.to_string(),
                    description: None,
                    amount,
                    expense_date,
                },
            )
            .await?;
    }

    let report = reports.find_one(report.id, user_id).await?;
    println!(
        "  Created demo report {} with {} expenses, total {}",
        report.id,
        report.expenses.len(),
        report.total_amount
    );
    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).context("invalid seed date")
}
