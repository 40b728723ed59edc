//! In-memory storage for tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use super::{AccountStore, FeeLedger, StoreError};
use crate::auth::{Account, AccountProfile, MAX_FIELD_LEN, MAX_YEAR_LEN, NewAccount, Role};
use crate::fees::{
    AMOUNT_SCALE, FeeAssignment, FeeStatus, MAX_FEE_NAME_LEN, NewFeeAssignment, OutstandingFee,
    PaymentDetails, amount_limit,
};
use crate::reports::AmountBucket;

#[derive(Debug, Default)]
struct Tables {
    accounts: Vec<Account>,
    fees: Vec<FeeAssignment>,
}

/// Account store and fee ledger backed by a mutex-guarded table pair.
///
/// Mirrors the database constraints the API relies on: unique email,
/// existing owner on insert, column widths, `NUMERIC(12,2)` rounding and
/// overflow, and the conditional payment write.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fee record as-is, bypassing owner checks.
    pub fn seed_fee(&self, fee: FeeAssignment) {
        self.tables().fees.push(fee);
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn check_width(column: &str, value: &str, max: usize) -> Result<(), StoreError> {
    if value.chars().count() > max {
        return Err(StoreError::Database(format!(
            "value too long for {column} (max {max})"
        )));
    }
    Ok(())
}

/// Rounds like a `NUMERIC(12,2)` column and rejects what would overflow it.
fn stored_amount(amount: Decimal) -> Result<Decimal, StoreError> {
    let rounded =
        amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.abs() >= amount_limit() {
        return Err(StoreError::Database(format!(
            "numeric field overflow for amount {amount}"
        )));
    }
    Ok(rounded)
}

#[async_trait::async_trait]
impl AccountStore for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .tables()
            .accounts
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self.tables().accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.tables().accounts.iter().any(|a| a.email == email))
    }

    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        check_width("name", &account.name, MAX_FIELD_LEN)?;
        check_width("email", &account.email, MAX_FIELD_LEN)?;
        if let AccountProfile::Student { course, year } = &account.profile {
            check_width("course", course, MAX_FIELD_LEN)?;
            check_width("year", year, MAX_YEAR_LEN)?;
        }

        let mut tables = self.tables();
        if tables.accounts.iter().any(|a| a.email == account.email) {
            return Err(StoreError::Duplicate(format!("email {}", account.email)));
        }

        let account = Account {
            id: Uuid::new_v4(),
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            profile: account.profile,
            created_at: Utc::now(),
        };
        tables.accounts.push(account.clone());
        Ok(account)
    }

    async fn count_by_role(&self, role: Role) -> Result<u64, StoreError> {
        let count = self
            .tables()
            .accounts
            .iter()
            .filter(|a| a.role() == role)
            .count();
        Ok(count as u64)
    }
}

#[async_trait::async_trait]
impl FeeLedger for InMemoryStore {
    async fn create(&self, fee: NewFeeAssignment) -> Result<FeeAssignment, StoreError> {
        check_width("fee_name", &fee.fee_name, MAX_FEE_NAME_LEN)?;
        let amount = stored_amount(fee.amount)?;

        let mut tables = self.tables();
        if !tables.accounts.iter().any(|a| a.id == fee.student_id) {
            return Err(StoreError::InvalidRecord(format!(
                "student {} does not exist",
                fee.student_id
            )));
        }

        let now = Utc::now();
        let record = FeeAssignment {
            id: Uuid::new_v4(),
            student_id: fee.student_id,
            fee_name: fee.fee_name,
            amount,
            due_date: fee.due_date,
            status: FeeStatus::Pending,
            transaction_id: None,
            payment_mode: None,
            paid_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.fees.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FeeAssignment>, StoreError> {
        Ok(self.tables().fees.iter().find(|f| f.id == id).cloned())
    }

    async fn list_for_student(&self, student_id: Uuid) -> Result<Vec<FeeAssignment>, StoreError> {
        let mut fees: Vec<FeeAssignment> = self
            .tables()
            .fees
            .iter()
            .filter(|f| f.student_id == student_id)
            .cloned()
            .collect();
        fees.sort_by_key(|f| f.due_date);
        Ok(fees)
    }

    async fn mark_paid(
        &self,
        id: Uuid,
        payment: PaymentDetails,
    ) -> Result<Option<FeeAssignment>, StoreError> {
        let mut tables = self.tables();
        let Some(fee) = tables
            .fees
            .iter_mut()
            .find(|f| f.id == id && !f.status.is_paid())
        else {
            return Ok(None);
        };

        fee.status = FeeStatus::Paid;
        fee.transaction_id = Some(payment.transaction_id);
        fee.payment_mode = Some(payment.payment_mode);
        fee.paid_at = Some(payment.paid_at);
        fee.updated_at = payment.paid_at;
        Ok(Some(fee.clone()))
    }

    async fn totals_by_status(&self) -> Result<Vec<AmountBucket>, StoreError> {
        let mut groups: BTreeMap<(&'static str, NaiveDate), (FeeStatus, Decimal)> = BTreeMap::new();
        let tables = self.tables();
        for fee in &tables.fees {
            let entry = groups
                .entry((fee.status.as_str(), fee.due_date))
                .or_insert((fee.status, Decimal::ZERO));
            entry.1 += fee.amount;
        }

        Ok(groups
            .into_iter()
            .map(|((_, due_date), (status, total))| AmountBucket {
                status,
                due_date,
                total,
            })
            .collect())
    }

    async fn list_outstanding(&self) -> Result<Vec<OutstandingFee>, StoreError> {
        let tables = self.tables();
        let mut outstanding: Vec<OutstandingFee> = tables
            .fees
            .iter()
            .filter(|f| !f.status.is_paid())
            .filter_map(|f| {
                let owner = tables.accounts.iter().find(|a| a.id == f.student_id)?;
                Some(OutstandingFee {
                    id: f.id,
                    student_id: f.student_id,
                    student_name: owner.name.clone(),
                    fee_name: f.fee_name.clone(),
                    amount: f.amount,
                    due_date: f.due_date,
                    status: f.status,
                })
            })
            .collect();
        outstanding.sort_by_key(|f| f.due_date);
        Ok(outstanding)
    }
}
