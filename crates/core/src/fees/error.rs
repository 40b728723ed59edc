//! Fee ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

use feedesk_shared::AppError;

/// Errors that can occur while assigning, paying or reading fees.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeeError {
    /// Required assign-fee fields are missing or blank.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Fee name exceeds the stored column width.
    #[error("Fee name must be at most {0} characters.")]
    FeeNameTooLong(usize),

    /// Amount is below zero.
    #[error("Amount must not be negative.")]
    NegativeAmount,

    /// Amount carries more decimal places than are stored.
    #[error("Amount must have at most {0} decimal places.")]
    AmountTooPrecise(u32),

    /// Amount does not fit the stored precision.
    #[error("Amount must be less than {0}.")]
    AmountTooLarge(Decimal),

    /// Due date is neither `YYYY-MM-DD` nor RFC 3339.
    #[error("Invalid due date '{0}': expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// Student ID is malformed, unknown or belongs to an admin.
    #[error("Student not found or ID is invalid.")]
    StudentNotFound,

    /// Assignment ID is malformed or unknown (payment path).
    #[error("Fee assignment not found.")]
    AssignmentNotFound,

    /// Assignment ID is malformed or unknown (receipt path).
    #[error("Payment record not found.")]
    ReceiptNotFound,

    /// Caller tried to pay another student's fee.
    #[error("Not authorized to pay this fee.")]
    NotOwner,

    /// Caller tried to read another student's receipt.
    #[error("Access denied.")]
    ReceiptForbidden,

    /// The fee has already been paid.
    #[error("This fee is already paid.")]
    AlreadyPaid,
}

impl FeeError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingFields(_)
            | Self::FeeNameTooLong(_)
            | Self::NegativeAmount
            | Self::AmountTooPrecise(_)
            | Self::AmountTooLarge(_)
            | Self::InvalidDueDate(_)
            | Self::AlreadyPaid => 400,
            Self::NotOwner => 401,
            Self::ReceiptForbidden => 403,
            Self::StudentNotFound | Self::AssignmentNotFound | Self::ReceiptNotFound => 404,
        }
    }
}

impl From<FeeError> for AppError {
    fn from(e: FeeError) -> Self {
        let message = e.to_string();
        match e.status_code() {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::BadRequest(message),
        }
    }
}
