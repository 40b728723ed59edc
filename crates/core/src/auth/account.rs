//! Account model and registration rules.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use feedesk_shared::{Role, auth::RegisterRequest};

use super::error::AuthError;

/// Longest name, email or course stored for an account, in characters.
pub const MAX_FIELD_LEN: usize = 255;

/// Longest cohort year stored for a student, in characters.
pub const MAX_YEAR_LEN: usize = 32;

/// Role-specific account data.
///
/// Students carry their course and cohort year; admins carry neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountProfile {
    /// Administrator.
    Admin,
    /// Student enrolled on a course.
    Student {
        /// Course name.
        course: String,
        /// Cohort year.
        year: String,
    },
}

impl AccountProfile {
    /// Returns the role this profile belongs to.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Admin => Role::Admin,
            Self::Student { .. } => Role::Student,
        }
    }

    /// Builds a profile from a role and optional student fields.
    ///
    /// Course and year are discarded for admins.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if a student lacks course or year.
    pub fn from_parts(
        role: Role,
        course: Option<String>,
        year: Option<String>,
    ) -> Result<Self, AuthError> {
        match role {
            Role::Admin => Ok(Self::Admin),
            Role::Student => match (non_blank(course), non_blank(year)) {
                (Some(course), Some(year)) => Ok(Self::Student { course, year }),
                (course, year) => {
                    let mut missing = Vec::new();
                    if course.is_none() {
                        missing.push("course");
                    }
                    if year.is_none() {
                        missing.push("year");
                    }
                    Err(AuthError::MissingFields(missing))
                }
            },
        }
    }

    /// Course, for students.
    #[must_use]
    pub fn course(&self) -> Option<&str> {
        match self {
            Self::Student { course, .. } => Some(course),
            Self::Admin => None,
        }
    }

    /// Cohort year, for students.
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        match self {
            Self::Student { year, .. } => Some(year),
            Self::Admin => None,
        }
    }
}

/// A persisted account.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    /// Account ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Normalized email.
    pub email: String,
    /// Argon2id PHC hash.
    pub password_hash: String,
    /// Role-specific data.
    pub profile: AccountProfile,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Returns the account role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.profile.role()
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[hidden]")
            .field("profile", &self.profile)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// An account ready to be inserted; the password is already hashed.
#[derive(Clone)]
pub struct NewAccount {
    /// Display name.
    pub name: String,
    /// Normalized email.
    pub email: String,
    /// Argon2id PHC hash.
    pub password_hash: String,
    /// Role-specific data.
    pub profile: AccountProfile,
}

impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

/// A validated registration request.
pub struct Registration {
    /// Display name, trimmed.
    pub name: String,
    /// Normalized email.
    pub email: String,
    /// Plaintext password; consumed by [`Registration::into_new_account`].
    password: String,
    /// Role-specific data.
    pub profile: AccountProfile,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("profile", &self.profile)
            .finish()
    }
}

impl Registration {
    /// Validates a registration request.
    ///
    /// # Errors
    ///
    /// - `AuthError::MissingFields` listing every absent or blank field
    /// - `AuthError::InvalidRole` if the role is not recognised
    /// - `AuthError::FieldTooLong` if name, email, course or year exceed the
    ///   `users` column widths
    pub fn validate(request: RegisterRequest) -> Result<Self, AuthError> {
        let name = non_blank(request.name);
        let email = non_blank(request.email);
        let password = request.password.filter(|p| !p.is_empty());
        let role = non_blank(request.role);

        let mut missing = Vec::new();
        if name.is_none() {
            missing.push("name");
        }
        if email.is_none() {
            missing.push("email");
        }
        if password.is_none() {
            missing.push("password");
        }
        if role.is_none() {
            missing.push("role");
        }

        let (Some(name), Some(email), Some(password), Some(role)) = (name, email, password, role)
        else {
            return Err(AuthError::MissingFields(missing));
        };

        let role = Role::parse(&role).ok_or(AuthError::InvalidRole(role))?;
        let profile = AccountProfile::from_parts(role, request.course, request.year)?;
        let email = normalize_email(&email);

        check_len("name", &name, MAX_FIELD_LEN)?;
        check_len("email", &email, MAX_FIELD_LEN)?;
        if let AccountProfile::Student { course, year } = &profile {
            check_len("course", course, MAX_FIELD_LEN)?;
            check_len("year", year, MAX_YEAR_LEN)?;
        }

        Ok(Self {
            name,
            email,
            password,
            profile,
        })
    }

    /// Returns the plaintext password for hashing.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Drops the plaintext and produces an insertable account.
    #[must_use]
    pub fn into_new_account(self, password_hash: String) -> NewAccount {
        NewAccount {
            name: self.name,
            email: self.email,
            password_hash,
            profile: self.profile,
        }
    }
}

/// Normalizes an email for storage and lookup (trimmed, lowercase).
///
/// This is the only normalization applied; the database enforces uniqueness
/// of the result, not its form.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), AuthError> {
    if value.chars().count() > max {
        return Err(AuthError::FieldTooLong { field, max });
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
