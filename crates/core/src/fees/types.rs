//! Fee ledger domain types.
//!
//! This module defines the fee assignment record, its lifecycle status and
//! the projections served to students and administrators.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Payment mode recorded for simulated payments.
pub const SIMULATED_PAYMENT_MODE: &str = "Online (Simulated)";

/// Longest fee name the ledger stores, in characters.
pub const MAX_FEE_NAME_LEN: usize = 255;

/// Decimal places kept for amounts.
pub const AMOUNT_SCALE: u32 = 2;

/// Integer digits available to amounts.
pub const AMOUNT_INTEGER_DIGITS: u32 = 10;

/// Exclusive upper bound for amounts (`10^AMOUNT_INTEGER_DIGITS`).
#[must_use]
pub fn amount_limit() -> Decimal {
    Decimal::from(10_i64.pow(AMOUNT_INTEGER_DIGITS))
}

/// Fee assignment status.
///
/// Stored transitions are:
/// - Pending → Paid
/// - Overdue → Paid
///
/// Paid is terminal. Overdue is normally derived at read time from a
/// Pending record whose due date has passed; see [`FeeStatus::effective`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeStatus {
    /// Awaiting payment.
    Pending,
    /// Settled.
    Paid,
    /// Unpaid past its due date.
    Overdue,
}

impl FeeStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
        }
    }

    /// Parses a status, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }

    /// Status as reported on `today`: Pending past its due date reads as Overdue.
    #[must_use]
    pub fn effective(self, due_date: NaiveDate, today: NaiveDate) -> Self {
        match self {
            Self::Pending if due_date < today => Self::Overdue,
            other => other,
        }
    }

    /// Returns true once the fee has been paid.
    #[must_use]
    pub const fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }

    /// Returns true if a stored record may move from `self` to `to`.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!((self, to), (Self::Pending | Self::Overdue, Self::Paid))
    }
}

impl fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fee assigned to a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeAssignment {
    /// Assignment ID.
    pub id: Uuid,
    /// Owning student.
    pub student_id: Uuid,
    /// Fee label.
    pub fee_name: String,
    /// Amount due.
    pub amount: Decimal,
    /// Calendar due date.
    pub due_date: NaiveDate,
    /// Status; stored or effective depending on where the record came from.
    pub status: FeeStatus,
    /// Set on payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Set on payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<String>,
    /// Set on payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl FeeAssignment {
    /// Replaces the stored status with the status effective on `today`.
    #[must_use]
    pub fn with_effective_status(mut self, today: NaiveDate) -> Self {
        self.status = self.status.effective(self.due_date, today);
        self
    }

    /// Returns true if `account_id` owns this assignment.
    #[must_use]
    pub fn is_owned_by(&self, account_id: Uuid) -> bool {
        self.student_id == account_id
    }
}

/// Assign-fee request payload.
///
/// Every field is optional at the wire level so missing ones can be reported
/// together. Amount accepts a JSON number or a decimal string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignFeeInput {
    /// Target student ID, as sent.
    pub student_id: Option<String>,
    /// Fee label.
    pub fee_name: Option<String>,
    /// Amount due.
    pub amount: Option<Decimal>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub due_date: Option<String>,
}

/// A validated assign-fee request whose student has not been resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDraft {
    /// Student ID as sent by the caller.
    pub student_ref: String,
    /// Trimmed fee label.
    pub fee_name: String,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Parsed due date.
    pub due_date: NaiveDate,
}

impl AssignmentDraft {
    /// Binds the draft to a resolved student.
    #[must_use]
    pub fn for_student(self, student_id: Uuid) -> NewFeeAssignment {
        NewFeeAssignment {
            student_id,
            fee_name: self.fee_name,
            amount: self.amount,
            due_date: self.due_date,
        }
    }
}

/// A fee assignment ready to be inserted with status Pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeeAssignment {
    /// Owning student.
    pub student_id: Uuid,
    /// Fee label.
    pub fee_name: String,
    /// Amount due.
    pub amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
}

/// Details recorded when a fee is paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    /// Unique transaction reference.
    pub transaction_id: String,
    /// Payment mode label.
    pub payment_mode: String,
    /// Payment time.
    pub paid_at: DateTime<Utc>,
}

/// An unpaid assignment joined with its owner, for the admin pending list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutstandingFee {
    /// Assignment ID.
    pub id: Uuid,
    /// Owning student.
    pub student_id: Uuid,
    /// Owning student's display name.
    pub student_name: String,
    /// Fee label.
    pub fee_name: String,
    /// Amount due.
    pub amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Effective status.
    pub status: FeeStatus,
}

impl OutstandingFee {
    /// Replaces the stored status with the status effective on `today`.
    #[must_use]
    pub fn with_effective_status(mut self, today: NaiveDate) -> Self {
        self.status = self.status.effective(self.due_date, today);
        self
    }
}
