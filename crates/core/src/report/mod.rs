//! Expense report aggregate.
//!
//! Reports are created in status `Created` with a zero total. Their total is
//! derived: every expense mutation calls back into
//! `ReportService::recalculate_total_amount`.

mod service;
mod types;


pub(crate) use service::ensure_report_modifiable;
pub use service::{ReportRepository, ReportService};
pub use types::{
    CreateReportInput, ExpenseReport, NewReport, ReportQuery, ReportSortField, ReportSummary,
    SortOrder, UpdateReportInput,
};
