//! Identity and access error types.

use thiserror::Error;

use feedesk_shared::{AppError, Role};

/// Errors raised by registration, login and access checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Required registration fields are missing or blank.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A registration field exceeds its stored column width.
    #[error("{field} must be at most {max} characters")]
    FieldTooLong {
        /// Request field name.
        field: &'static str,
        /// Maximum length in characters.
        max: usize,
    },

    /// Role is neither `Admin` nor `Student`.
    #[error("Invalid role '{0}': expected Admin or Student")]
    InvalidRole(String),

    /// An account with this email already exists.
    #[error("User already exists")]
    EmailTaken,

    /// Unknown email or wrong password; deliberately indistinguishable.
    #[error("Invalid Credentials")]
    InvalidCredentials,

    /// No session token was presented.
    #[error("No token, authorization denied")]
    MissingToken,

    /// Session token failed verification.
    #[error("Token is not valid")]
    InvalidToken,

    /// Caller's role is not admitted by the guard.
    #[error("Access denied: {0} role required")]
    RoleRequired(Role),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        let message = e.to_string();
        match e {
            AuthError::MissingFields(_)
            | AuthError::FieldTooLong { .. }
            | AuthError::InvalidRole(_)
            | AuthError::InvalidCredentials => Self::BadRequest(message),
            AuthError::EmailTaken => Self::Conflict(message),
            AuthError::MissingToken | AuthError::InvalidToken => Self::Unauthorized(message),
            AuthError::RoleRequired(_) => Self::Forbidden(message),
        }
    }
}
