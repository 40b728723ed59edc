//! Fee assignment lifecycle.
//!
//! # Modules
//!
//! - `types` - Fee records, status, request and projection types
//! - `error` - Fee-specific error types
//! - `service` - Assignment validation, payment and receipt rules

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::FeeError;
pub use service::FeeService;
pub use types::{
    AMOUNT_INTEGER_DIGITS, AMOUNT_SCALE, AssignFeeInput, AssignmentDraft, FeeAssignment, FeeStatus,
    MAX_FEE_NAME_LEN, NewFeeAssignment, OutstandingFee, PaymentDetails, SIMULATED_PAYMENT_MODE,
    amount_limit,
};
