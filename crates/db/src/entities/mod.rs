//! `SeaORM` entity definitions.

pub mod attachments;
pub mod expense_reports;
pub mod expenses;
pub mod sea_orm_active_enums;
pub mod users;
