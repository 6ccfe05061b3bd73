//! Initial database migration.
//!
//! Creates the enums and the users, expense reports, expenses and
//! attachments tables, then seeds the placeholder employee that every
//! request currently runs as.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(EXPENSE_REPORTS_SQL).await?;
        db.execute_unprepared(EXPENSES_SQL).await?;
        db.execute_unprepared(ATTACHMENTS_SQL).await?;
        db.execute_unprepared(SEED_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE expense_status AS ENUM ('CREATED', 'SUBMITTED', 'VALIDATED', 'REJECTED', 'PAID');

CREATE TYPE expense_category AS ENUM (
    'MEALS', 'TRAVEL', 'SUPPLIES', 'TEAM_EVENT', 'PARKING', 'ACCOMMODATION', 'TRANSPORT', 'OTHER'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    role VARCHAR(50) NOT NULL DEFAULT 'EMPLOYEE',
    manager_id UUID REFERENCES users(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const EXPENSE_REPORTS_SQL: &str = r"
CREATE TABLE expense_reports (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    purpose VARCHAR(500) NOT NULL,
    report_date DATE NOT NULL,
    total_amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    status expense_status NOT NULL DEFAULT 'CREATED',
    payment_date DATE,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_report_total_non_negative CHECK (total_amount >= 0)
);

-- Listing: a user's reports, newest report date first
CREATE INDEX idx_expense_reports_user ON expense_reports(user_id, report_date DESC);
CREATE INDEX idx_expense_reports_user_status ON expense_reports(user_id, status);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    category expense_category NOT NULL,
    expense_name VARCHAR(255) NOT NULL,
    description TEXT,
    amount NUMERIC(10, 2) NOT NULL,
    expense_date DATE NOT NULL,
    status expense_status NOT NULL DEFAULT 'CREATED',
    report_id UUID NOT NULL REFERENCES expense_reports(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expense_amount_non_negative CHECK (amount >= 0)
);

CREATE INDEX idx_expenses_report ON expenses(report_id, expense_date DESC);
";

const ATTACHMENTS_SQL: &str = r"
CREATE TABLE attachments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    file_name VARCHAR(255) NOT NULL,
    file_path VARCHAR(500) NOT NULL,
    mime_type VARCHAR(100) NOT NULL,
    size INTEGER NOT NULL CHECK (size >= 0),
    expense_id UUID NOT NULL REFERENCES expenses(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_attachments_expense ON attachments(expense_id);
";

const SEED_SQL: &str = r"
INSERT INTO users (id, email, name, role)
VALUES ('00000000-0000-0000-0000-000000000001', 'employee@example.com', 'Test Employee', 'EMPLOYEE')
ON CONFLICT (id) DO NOTHING;
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS attachments CASCADE;
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS expense_reports CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP TYPE IF EXISTS expense_category;
DROP TYPE IF EXISTS expense_status;
";
