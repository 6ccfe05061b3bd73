//! Postgres enum types and their mapping to domain enums.

use expensa_core::expense::ExpenseCategory as DomainCategory;
use expensa_core::workflow::ExpenseStatus as DomainStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `expense_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "expense_status")]
pub enum ExpenseStatus {
    /// `CREATED`
    #[sea_orm(string_value = "CREATED")]
    Created,
    /// `SUBMITTED`
    #[sea_orm(string_value = "SUBMITTED")]
    Submitted,
    /// `VALIDATED`
    #[sea_orm(string_value = "VALIDATED")]
    Validated,
    /// `REJECTED`
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    /// `PAID`
    #[sea_orm(string_value = "PAID")]
    Paid,
}

/// `expense_category` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "expense_category")]
pub enum ExpenseCategory {
    /// `MEALS`
    #[sea_orm(string_value = "MEALS")]
    Meals,
    /// `TRAVEL`
    #[sea_orm(string_value = "TRAVEL")]
    Travel,
    /// `SUPPLIES`
    #[sea_orm(string_value = "SUPPLIES")]
    Supplies,
    /// `TEAM_EVENT`
    #[sea_orm(string_value = "TEAM_EVENT")]
    TeamEvent,
    /// `PARKING`
    #[sea_orm(string_value = "PARKING")]
    Parking,
    /// `ACCOMMODATION`
    #[sea_orm(string_value = "ACCOMMODATION")]
    Accommodation,
    /// `TRANSPORT`
    #[sea_orm(string_value = "TRANSPORT")]
    Transport,
    /// `OTHER`
    #[sea_orm(string_value = "OTHER")]
    Other,
}

impl From<DomainStatus> for ExpenseStatus {
    fn from(status: DomainStatus) -> Self {
        match status {
            DomainStatus::Created => Self::Created,
            DomainStatus::Submitted => Self::Submitted,
            DomainStatus::Validated => Self::Validated,
            DomainStatus::Rejected => Self::Rejected,
            DomainStatus::Paid => Self::Paid,
        }
    }
}

impl From<ExpenseStatus> for DomainStatus {
    fn from(status: ExpenseStatus) -> Self {
        match status {
            ExpenseStatus::Created => Self::Created,
            ExpenseStatus::Submitted => Self::Submitted,
            ExpenseStatus::Validated => Self::Validated,
            ExpenseStatus::Rejected => Self::Rejected,
            ExpenseStatus::Paid => Self::Paid,
        }
    }
}

impl From<DomainCategory> for ExpenseCategory {
    fn from(category: DomainCategory) -> Self {
        match category {
            DomainCategory::Meals => Self::Meals,
            DomainCategory::Travel => Self::Travel,
            DomainCategory::Supplies => Self::Supplies,
            DomainCategory::TeamEvent => Self::TeamEvent,
            DomainCategory::Parking => Self::Parking,
            DomainCategory::Accommodation => Self::Accommodation,
            DomainCategory::Transport => Self::Transport,
            DomainCategory::Other => Self::Other,
        }
    }
}

impl From<ExpenseCategory> for DomainCategory {
    fn from(category: ExpenseCategory) -> Self {
        match category {
            ExpenseCategory::Meals => Self::Meals,
            ExpenseCategory::Travel => Self::Travel,
            ExpenseCategory::Supplies => Self::Supplies,
            ExpenseCategory::TeamEvent => Self::TeamEvent,
            ExpenseCategory::Parking => Self::Parking,
            ExpenseCategory::Accommodation => Self::Accommodation,
            ExpenseCategory::Transport => Self::Transport,
            ExpenseCategory::Other => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_round_trips() {
        for status in DomainStatus::ALL {
            let db: ExpenseStatus = status.into();
            assert_eq!(DomainStatus::from(db), status);
            assert_eq!(db.to_value(), status.as_str());
        }
    }

    #[test]
    fn test_category_mapping_round_trips() {
        for category in DomainCategory::ALL {
            let db: ExpenseCategory = category.into();
            assert_eq!(DomainCategory::from(db), category);
            assert_eq!(db.to_value(), category.as_str());
        }
    }
}
