//! Identity and access rules.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - The account model, a tagged union over role
//! - Registration validation
//! - A role guard parametrized by the roles it admits

mod account;
mod error;
mod guard;
mod password;

pub use account::{
    Account, AccountProfile, MAX_FIELD_LEN, MAX_YEAR_LEN, NewAccount, Registration,
    normalize_email,
};
pub use error::AuthError;
pub use feedesk_shared::Role;
pub use guard::RoleGuard;
pub use password::{PasswordError, hash_password, verify_password};
