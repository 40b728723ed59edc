//! Report generation service.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{AmountBucket, FeeSummary, SUMMARY_LABELS};
use crate::fees::FeeStatus;

/// Service for aggregating fee collection reports.
pub struct ReportService;

impl ReportService {
    /// Builds the collection summary from stored buckets as of `today`.
    ///
    /// Buckets are regrouped by effective status, so pending amounts past
    /// their due date count as overdue. Empty groups report zero.
    #[must_use]
    pub fn summarize(buckets: &[AmountBucket], today: NaiveDate) -> FeeSummary {
        let mut paid = Decimal::ZERO;
        let mut pending = Decimal::ZERO;
        let mut overdue = Decimal::ZERO;

        for bucket in buckets {
            match bucket.status.effective(bucket.due_date, today) {
                FeeStatus::Paid => paid += bucket.total,
                FeeStatus::Pending => pending += bucket.total,
                FeeStatus::Overdue => overdue += bucket.total,
            }
        }

        FeeSummary {
            labels: SUMMARY_LABELS.iter().map(ToString::to_string).collect(),
            amounts: vec![paid, pending, overdue],
            total_collected: paid,
            total_remaining: pending + overdue,
        }
    }
}
