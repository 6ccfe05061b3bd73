//! Expense aggregate, nested under expense reports.

mod service;
mod types;


pub use service::{ExpenseRepository, ExpenseService};
pub use types::{
    CreateExpenseInput, Expense, ExpenseCategory, ExpenseWithReport, NewExpense,
    UpdateExpenseInput,
};
