//! Property-based tests for the fee lifecycle.

use chrono::{Duration, NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::fees::error::FeeError;
use crate::fees::service::FeeService;
use crate::fees::types::{AssignFeeInput, FeeAssignment, FeeStatus};

fn arb_status() -> impl Strategy<Value = FeeStatus> {
    prop_oneof![
        Just(FeeStatus::Pending),
        Just(FeeStatus::Paid),
        Just(FeeStatus::Overdue),
    ]
}

fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|days| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(days)
    })
}

fn record(owner: Uuid, status: FeeStatus, due_date: NaiveDate) -> FeeAssignment {
    let now = Utc::now();
    FeeAssignment {
        id: Uuid::new_v4(),
        student_id: owner,
        fee_name: "Fee".into(),
        amount: Decimal::ONE,
        due_date,
        status,
        transaction_id: None,
        payment_mode: None,
        paid_at: None,
        created_at: now,
        updated_at: now,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Only a stored Pending record with a past due date changes when read.
    #[test]
    fn prop_effective_status_only_flags_past_pending(
        status in arb_status(),
        due in arb_date(),
        today in arb_date(),
    ) {
        let effective = status.effective(due, today);
        if status == FeeStatus::Pending && due < today {
            prop_assert_eq!(effective, FeeStatus::Overdue);
        } else {
            prop_assert_eq!(effective, status);
        }
    }

    /// Deriving twice is the same as deriving once.
    #[test]
    fn prop_effective_status_idempotent(
        status in arb_status(),
        due in arb_date(),
        today in arb_date(),
    ) {
        let once = status.effective(due, today);
        prop_assert_eq!(once.effective(due, today), once);
    }

    /// Paid is terminal.
    #[test]
    fn prop_paid_is_terminal(to in arb_status()) {
        prop_assert!(!FeeStatus::Paid.can_transition_to(to));
    }

    /// A non-owner is always refused with NotOwner, whatever the status.
    #[test]
    fn prop_non_owner_never_sees_status(
        owner in arb_uuid(),
        caller in arb_uuid(),
        status in arb_status(),
        due in arb_date(),
    ) {
        prop_assume!(owner != caller);
        let fee = record(owner, status, due);

        prop_assert_eq!(FeeService::authorize_payment(&fee, caller), Err(FeeError::NotOwner));
        prop_assert_eq!(FeeService::authorize_receipt(&fee, caller), Err(FeeError::ReceiptForbidden));
    }

    /// The owner may pay exactly when the stored status allows a move to Paid.
    #[test]
    fn prop_owner_payment_follows_transitions(
        owner in arb_uuid(),
        status in arb_status(),
        due in arb_date(),
    ) {
        let fee = record(owner, status, due);
        let allowed = FeeService::authorize_payment(&fee, owner).is_ok();
        prop_assert_eq!(allowed, status.can_transition_to(FeeStatus::Paid));
    }

    /// Negative amounts are always rejected, non-negative ones always accepted.
    #[test]
    fn prop_amount_sign_decides_validity(cents in -1_000_000i64..1_000_000) {
        let amount = Decimal::new(cents, 2);
        let result = FeeService::validate_assignment(AssignFeeInput {
            student_id: Some(Uuid::new_v4().to_string()),
            fee_name: Some("Exam".into()),
            amount: Some(amount),
            due_date: Some("2027-01-15".into()),
        });

        if cents < 0 {
            prop_assert_eq!(result, Err(FeeError::NegativeAmount));
        } else {
            prop_assert_eq!(result.map(|d| d.amount), Ok(amount));
        }
    }

    /// Transaction IDs have the documented shape.
    #[test]
    fn prop_transaction_id_shape(millis in 0i64..4_000_000_000_000) {
        let now = chrono::DateTime::from_timestamp_millis(millis).unwrap();
        let id = FeeService::transaction_id(now);
        let parts: Vec<&str> = id.split('-').collect();

        prop_assert_eq!(parts.len(), 3);
        prop_assert_eq!(parts[0], "TXN");
        prop_assert_eq!(parts[1], millis.to_string());
        prop_assert_eq!(parts[2].len(), 12);
        prop_assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }
}
