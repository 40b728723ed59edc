//! Entity re-exports.

pub use super::fee_assignments::Entity as FeeAssignments;
pub use super::users::Entity as Users;
