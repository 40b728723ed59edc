//! Shared types, errors, and configuration for FeeDesk.
//!
//! This crate provides common types used across all other crates:
//! - Account roles
//! - Application-wide error taxonomy
//! - Session token claims and signing
//! - Auth request/response payloads
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

#[cfg(test)]
mod jwt_tests;

pub use auth::Claims;
pub use config::{AppConfig, JwtConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};
pub use types::Role;
