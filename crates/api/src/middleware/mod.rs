//! Request middleware.
//!
//! Protected route groups stack [`auth::auth_middleware`] outermost and
//! [`role::require_role`] inside it.

pub mod auth;
pub mod role;

pub use auth::{AuthUser, auth_middleware};
pub use role::require_role;
