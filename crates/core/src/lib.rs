//! Core business logic for Expensa.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! The persistence gateways are traits implemented by the db crate.
//!
//! # Modules
//!
//! - `workflow` - Status transition table and modifiability rule
//! - `report` - Expense report lifecycle and total recalculation
//! - `expense` - Expense lifecycle, nested under reports
//! - `attachment` - Attachment metadata

pub mod attachment;
pub mod error;
pub mod expense;
pub mod report;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use error::{Operation, ServiceError};
