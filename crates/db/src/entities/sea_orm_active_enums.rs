//! String-backed enums shared by the entities.
//!
//! Stored as VARCHAR with CHECK constraints rather than PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use feedesk_core::auth::Role;
use feedesk_core::fees::FeeStatus as CoreFeeStatus;

/// Account role column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum UserRole {
    /// Administrator.
    #[sea_orm(string_value = "Admin")]
    Admin,
    /// Student.
    #[sea_orm(string_value = "Student")]
    Student,
}

impl From<UserRole> for Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::Student => Self::Student,
        }
    }
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Student => Self::Student,
        }
    }
}

/// Fee assignment status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum FeeStatus {
    /// Awaiting payment.
    #[sea_orm(string_value = "Pending")]
    Pending,
    /// Settled.
    #[sea_orm(string_value = "Paid")]
    Paid,
    /// Stored overdue marker.
    #[sea_orm(string_value = "Overdue")]
    Overdue,
}

impl From<FeeStatus> for CoreFeeStatus {
    fn from(status: FeeStatus) -> Self {
        match status {
            FeeStatus::Pending => Self::Pending,
            FeeStatus::Paid => Self::Paid,
            FeeStatus::Overdue => Self::Overdue,
        }
    }
}

impl From<CoreFeeStatus> for FeeStatus {
    fn from(status: CoreFeeStatus) -> Self {
        match status {
            CoreFeeStatus::Pending => Self::Pending,
            CoreFeeStatus::Paid => Self::Paid,
            CoreFeeStatus::Overdue => Self::Overdue,
        }
    }
}
