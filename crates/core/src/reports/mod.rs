//! Fee collection reports.
//!
//! Pure aggregation over totals fetched by the ledger; the summary regroups
//! them by effective status.

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::*;
