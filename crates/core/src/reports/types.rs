//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fees::FeeStatus;

/// Labels of the summary buckets, in response order.
pub const SUMMARY_LABELS: [&str; 3] = ["Total Paid", "Total Pending", "Total Overdue"];

/// Sum of amounts sharing a stored status and due date.
///
/// The due date is kept so the effective status can be derived per bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountBucket {
    /// Stored status.
    pub status: FeeStatus,
    /// Due date shared by the bucket.
    pub due_date: NaiveDate,
    /// Sum of amounts.
    pub total: Decimal,
}

/// Collection summary for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSummary {
    /// Bucket labels.
    pub labels: Vec<String>,
    /// Paid, pending and overdue totals, aligned with `labels`.
    pub amounts: Vec<Decimal>,
    /// Sum of paid amounts.
    pub total_collected: Decimal,
    /// Sum of pending and overdue amounts.
    pub total_remaining: Decimal,
}
