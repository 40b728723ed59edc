//! Fee lifecycle rules.
//!
//! Validation of new assignments, ownership checks for payment and receipt
//! access, and construction of payment details. Persistence is left to the
//! [`FeeLedger`](crate::store::FeeLedger) port; the conditional write that
//! guarantees exactly-once payment lives there.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::auth::{Account, Role};
use crate::fees::error::FeeError;
use crate::fees::types::{
    AMOUNT_SCALE, AssignFeeInput, AssignmentDraft, FeeAssignment, MAX_FEE_NAME_LEN,
    PaymentDetails, SIMULATED_PAYMENT_MODE, amount_limit,
};

/// Stateless service for fee lifecycle rules.
pub struct FeeService;

impl FeeService {
    /// Validates an assign-fee request.
    ///
    /// Checks run in order: missing fields, fee name length, amount sign,
    /// amount precision and magnitude, due date format. Limits match the
    /// `fee_assignments` columns (`VARCHAR(255)`, `NUMERIC(12,2)`). The
    /// student reference is kept as sent and resolved by the caller.
    ///
    /// # Errors
    ///
    /// - `FeeError::MissingFields` listing every absent or blank field
    /// - `FeeError::FeeNameTooLong` if the name exceeds 255 characters
    /// - `FeeError::NegativeAmount` if the amount is below zero
    /// - `FeeError::AmountTooPrecise` if it has more than 2 decimal places
    /// - `FeeError::AmountTooLarge` if it is 10^10 or more
    /// - `FeeError::InvalidDueDate` if the due date cannot be parsed
    pub fn validate_assignment(input: AssignFeeInput) -> Result<AssignmentDraft, FeeError> {
        let student_ref = non_blank(input.student_id);
        let fee_name = non_blank(input.fee_name);
        let due_date = non_blank(input.due_date);

        let mut missing = Vec::new();
        if student_ref.is_none() {
            missing.push("studentId");
        }
        if fee_name.is_none() {
            missing.push("feeName");
        }
        if input.amount.is_none() {
            missing.push("amount");
        }
        if due_date.is_none() {
            missing.push("dueDate");
        }

        let (Some(student_ref), Some(fee_name), Some(amount), Some(due_date)) =
            (student_ref, fee_name, input.amount, due_date)
        else {
            return Err(FeeError::MissingFields(missing));
        };

        if fee_name.chars().count() > MAX_FEE_NAME_LEN {
            return Err(FeeError::FeeNameTooLong(MAX_FEE_NAME_LEN));
        }
        if amount < Decimal::ZERO {
            return Err(FeeError::NegativeAmount);
        }
        // Trailing zeros are fine: 10.500 is stored as 10.50.
        if amount.normalize().scale() > AMOUNT_SCALE {
            return Err(FeeError::AmountTooPrecise(AMOUNT_SCALE));
        }
        let limit = amount_limit();
        if amount >= limit {
            return Err(FeeError::AmountTooLarge(limit));
        }

        Ok(AssignmentDraft {
            student_ref,
            fee_name,
            amount,
            due_date: Self::parse_due_date(&due_date)?,
        })
    }

    /// Parses a due date given as `YYYY-MM-DD` or as an RFC 3339 timestamp.
    ///
    /// For timestamps the UTC calendar date is taken.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::InvalidDueDate` for anything else.
    pub fn parse_due_date(raw: &str) -> Result<NaiveDate, FeeError> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| {
                DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc).date_naive())
            })
            .map_err(|_| FeeError::InvalidDueDate(raw.to_string()))
    }

    /// Parses a caller-supplied record ID; malformed IDs are treated as absent.
    #[must_use]
    pub fn parse_id(raw: &str) -> Option<Uuid> {
        Uuid::parse_str(raw.trim()).ok()
    }

    /// Ensures the resolved account exists and is a student.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::StudentNotFound` for a missing account or an admin.
    pub fn ensure_student(account: Option<Account>) -> Result<Account, FeeError> {
        match account {
            Some(account) if account.role() == Role::Student => Ok(account),
            _ => Err(FeeError::StudentNotFound),
        }
    }

    /// Checks that `caller` may pay `assignment`.
    ///
    /// Ownership is checked before status, so another student's fee is never
    /// reported as already paid.
    ///
    /// # Errors
    ///
    /// - `FeeError::NotOwner` if the caller does not own the fee
    /// - `FeeError::AlreadyPaid` if the fee is already settled
    pub fn authorize_payment(assignment: &FeeAssignment, caller: Uuid) -> Result<(), FeeError> {
        if !assignment.is_owned_by(caller) {
            return Err(FeeError::NotOwner);
        }
        if assignment.status.is_paid() {
            return Err(FeeError::AlreadyPaid);
        }
        Ok(())
    }

    /// Checks that `caller` may read the receipt for `assignment`.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::ReceiptForbidden` if the caller does not own the fee.
    pub fn authorize_receipt(assignment: &FeeAssignment, caller: Uuid) -> Result<(), FeeError> {
        if assignment.is_owned_by(caller) {
            Ok(())
        } else {
            Err(FeeError::ReceiptForbidden)
        }
    }

    /// Builds the details recorded for a simulated payment made at `now`.
    #[must_use]
    pub fn simulated_payment(now: DateTime<Utc>) -> PaymentDetails {
        PaymentDetails {
            transaction_id: Self::transaction_id(now),
            payment_mode: SIMULATED_PAYMENT_MODE.to_string(),
            paid_at: now,
        }
    }

    /// Generates `TXN-<unix millis>-<12 random hex digits>`.
    #[must_use]
    pub fn transaction_id(now: DateTime<Utc>) -> String {
        let entropy = Uuid::new_v4().simple().to_string();
        format!("TXN-{}-{}", now.timestamp_millis(), &entropy[..12])
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AccountProfile;
    use crate::fees::types::FeeStatus;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn input() -> AssignFeeInput {
        AssignFeeInput {
            student_id: Some(Uuid::new_v4().to_string()),
            fee_name: Some("  Library Fee ".into()),
            amount: Some(dec!(120.50)),
            due_date: Some("2026-12-31".into()),
        }
    }

    fn assignment(owner: Uuid, status: FeeStatus) -> FeeAssignment {
        let now = Utc::now();
        FeeAssignment {
            id: Uuid::new_v4(),
            student_id: owner,
            fee_name: "Tuition".into(),
            amount: dec!(100),
            due_date: now.date_naive(),
            status,
            transaction_id: None,
            payment_mode: None,
            paid_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn account(profile: AccountProfile) -> Account {
        Account {
            id: Uuid::new_v4(),
            name: "Someone".into(),
            email: "someone@example.com".into(),
            password_hash: String::new(),
            profile,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_assignment_trims_and_parses() {
        let draft = FeeService::validate_assignment(input()).unwrap();
        assert_eq!(draft.fee_name, "Library Fee");
        assert_eq!(draft.amount, dec!(120.50));
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn test_validate_assignment_lists_all_missing() {
        let err = FeeService::validate_assignment(AssignFeeInput {
            fee_name: Some("   ".into()),
            ..AssignFeeInput::default()
        })
        .unwrap_err();
        assert_eq!(
            err,
            FeeError::MissingFields(vec!["studentId", "feeName", "amount", "dueDate"])
        );
    }

    #[test]
    fn test_zero_amount_allowed_negative_rejected() {
        let mut free = input();
        free.amount = Some(Decimal::ZERO);
        assert!(FeeService::validate_assignment(free).is_ok());

        let mut negative = input();
        negative.amount = Some(dec!(-0.01));
        assert_eq!(
            FeeService::validate_assignment(negative),
            Err(FeeError::NegativeAmount)
        );
    }

    #[rstest]
    #[case(255, true)]
    #[case(256, false)]
    fn test_fee_name_length_limit(#[case] len: usize, #[case] accepted: bool) {
        let mut request = input();
        request.fee_name = Some("é".repeat(len));

        let result = FeeService::validate_assignment(request);
        if accepted {
            assert_eq!(result.unwrap().fee_name.chars().count(), len);
        } else {
            assert_eq!(result, Err(FeeError::FeeNameTooLong(255)));
        }
    }

    #[rstest]
    #[case(dec!(9999999999.99), None)]
    #[case(dec!(10.500), None)]
    #[case(dec!(0.01), None)]
    #[case(dec!(10.005), Some(FeeError::AmountTooPrecise(2)))]
    #[case(dec!(123456789012.345), Some(FeeError::AmountTooPrecise(2)))]
    #[case(dec!(10000000000), Some(FeeError::AmountTooLarge(dec!(10000000000))))]
    #[case(dec!(123456789012.34), Some(FeeError::AmountTooLarge(dec!(10000000000))))]
    fn test_amount_must_fit_storage(#[case] amount: Decimal, #[case] expected: Option<FeeError>) {
        let mut request = input();
        request.amount = Some(amount);

        match expected {
            None => assert_eq!(
                FeeService::validate_assignment(request).map(|d| d.amount),
                Ok(amount)
            ),
            Some(err) => assert_eq!(FeeService::validate_assignment(request), Err(err)),
        }
    }

    #[test]
    fn test_parse_due_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(FeeService::parse_due_date("2026-03-15"), Ok(expected));
        assert_eq!(
            FeeService::parse_due_date("2026-03-15T10:00:00Z"),
            Ok(expected)
        );
        assert_eq!(
            FeeService::parse_due_date("2026-03-16T01:00:00+05:00"),
            Ok(expected)
        );
        assert!(matches!(
            FeeService::parse_due_date("next tuesday"),
            Err(FeeError::InvalidDueDate(_))
        ));
        assert!(FeeService::parse_due_date("2026-02-30").is_err());
    }

    #[test]
    fn test_ensure_student() {
        let student = account(AccountProfile::Student {
            course: "Maths".into(),
            year: "2".into(),
        });
        assert!(FeeService::ensure_student(Some(student)).is_ok());
        assert_eq!(
            FeeService::ensure_student(Some(account(AccountProfile::Admin))),
            Err(FeeError::StudentNotFound)
        );
        assert_eq!(
            FeeService::ensure_student(None),
            Err(FeeError::StudentNotFound)
        );
    }

    #[test]
    fn test_authorize_payment_checks_owner_first() {
        let owner = Uuid::new_v4();
        let paid = assignment(owner, FeeStatus::Paid);

        assert_eq!(
            FeeService::authorize_payment(&paid, Uuid::new_v4()),
            Err(FeeError::NotOwner)
        );
        assert_eq!(
            FeeService::authorize_payment(&paid, owner),
            Err(FeeError::AlreadyPaid)
        );
        assert!(FeeService::authorize_payment(&assignment(owner, FeeStatus::Overdue), owner).is_ok());
    }

    #[test]
    fn test_authorize_receipt_any_status() {
        let owner = Uuid::new_v4();
        for status in [FeeStatus::Pending, FeeStatus::Paid, FeeStatus::Overdue] {
            let record = assignment(owner, status);
            assert!(FeeService::authorize_receipt(&record, owner).is_ok());
            assert_eq!(
                FeeService::authorize_receipt(&record, Uuid::new_v4()),
                Err(FeeError::ReceiptForbidden)
            );
        }
    }

    #[test]
    fn test_simulated_payment_details() {
        let now = Utc::now();
        let details = FeeService::simulated_payment(now);

        assert_eq!(details.payment_mode, "Online (Simulated)");
        assert_eq!(details.paid_at, now);
        assert!(
            details
                .transaction_id
                .starts_with(&format!("TXN-{}-", now.timestamp_millis()))
        );
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(FeeService::parse_id(&id.to_string()), Some(id));
        assert_eq!(FeeService::parse_id("12345"), None);
    }
}
