//! Storage ports.
//!
//! The API depends on these traits only. `feedesk-db` implements them over
//! PostgreSQL; [`InMemoryStore`] implements them for tests.

mod error;
#[cfg(any(test, feature = "test-util"))]
mod memory;

use uuid::Uuid;

use crate::auth::{Account, NewAccount, Role};
use crate::fees::{FeeAssignment, NewFeeAssignment, OutstandingFee, PaymentDetails};
use crate::reports::AmountBucket;

pub use error::StoreError;
#[cfg(any(test, feature = "test-util"))]
pub use memory::InMemoryStore;

/// Persistent account records.
///
/// Emails passed in are expected to be normalized already.
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Looks up an account by normalized email.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Looks up an account by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    /// Returns true if an account with this email exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Inserts a new account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` if the email is already taken.
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Counts accounts with the given role.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    async fn count_by_role(&self, role: Role) -> Result<u64, StoreError>;
}

/// Persistent fee assignment records.
///
/// Records are returned with their stored status; callers derive the
/// effective status.
#[async_trait::async_trait]
pub trait FeeLedger: Send + Sync {
    /// Inserts a new Pending assignment.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the insert fails.
    async fn create(&self, fee: NewFeeAssignment) -> Result<FeeAssignment, StoreError>;

    /// Looks up an assignment by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FeeAssignment>, StoreError>;

    /// Lists a student's assignments by ascending due date.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    async fn list_for_student(&self, student_id: Uuid) -> Result<Vec<FeeAssignment>, StoreError>;

    /// Marks an assignment Paid if it is not Paid already.
    ///
    /// Returns `None` when no row was updated, either because the assignment
    /// does not exist or because another payment got there first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the update fails.
    async fn mark_paid(
        &self,
        id: Uuid,
        payment: PaymentDetails,
    ) -> Result<Option<FeeAssignment>, StoreError>;

    /// Sums amounts grouped by stored status and due date.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    async fn totals_by_status(&self) -> Result<Vec<AmountBucket>, StoreError>;

    /// Lists every assignment not yet Paid, joined with its owner and ordered
    /// by due date. Assignments without an owner are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    async fn list_outstanding(&self) -> Result<Vec<OutstandingFee>, StoreError>;
}
