//! Status workflow shared by expense reports and expenses.
//!
//! # Modules
//!
//! - `types` - The `ExpenseStatus` enum
//! - `error` - Workflow-specific error types
//! - `service` - Transition table and modifiability rule

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WorkflowError;
pub use service::WorkflowService;
pub use types::ExpenseStatus;
