use feedesk_shared::Role;

use super::error::AuthError;

/// Admits callers whose role is in a fixed allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGuard {
    allowed: &'static [Role],
}

impl RoleGuard {
    /// Admin-only routes.
    pub const ADMIN: Self = Self::new(&[Role::Admin]);

    /// Student-only routes.
    pub const STUDENT: Self = Self::new(&[Role::Student]);

    /// Creates a guard admitting `allowed`.
    #[must_use]
    pub const fn new(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    /// Roles this guard admits.
    #[must_use]
    pub const fn allowed(&self) -> &'static [Role] {
        self.allowed
    }

    /// Checks a caller's role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::RoleRequired` naming the first admitted role when
    /// `role` is not admitted.
    pub fn check(&self, role: Role) -> Result<(), AuthError> {
        if self.allowed.contains(&role) {
            return Ok(());
        }
        let required = self.allowed.first().copied().unwrap_or(Role::Admin);
        Err(AuthError::RoleRequired(required))
    }
}
