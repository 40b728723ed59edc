//! Repository abstractions for data access.
//!
//! Repositories implement the `feedesk-core` storage ports, hiding the
//! `SeaORM` implementation details from the rest of the application.

pub mod fee;
pub mod user;

pub use fee::FeeRepository;
pub use user::UserRepository;

use sea_orm::{DbErr, SqlErr};

use feedesk_core::store::StoreError;

/// Maps a `SeaORM` error onto the storage port error.
///
/// Unique violations become `StoreError::Duplicate` and foreign key
/// violations `StoreError::InvalidRecord`, matching the in-memory store.
pub(crate) fn store_err(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::Duplicate(detail),
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => StoreError::InvalidRecord(detail),
        _ => StoreError::Database(err.to_string()),
    }
}
