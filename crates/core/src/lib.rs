//! Core business rules for FeeDesk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached only through the traits in [`store`].
//!
//! # Modules
//!
//! - `auth` - Account model, registration rules, password hashing, role guard
//! - `fees` - Fee assignment lifecycle and payment rules
//! - `reports` - Collection summary aggregation
//! - `store` - Storage ports implemented by the database layer

pub mod auth;
pub mod fees;
pub mod reports;
pub mod store;
