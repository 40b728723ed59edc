//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use feedesk_core::auth::{Account, AccountProfile, NewAccount, Role};
use feedesk_core::store::{AccountStore, StoreError};

use super::store_err;
use crate::entities::sea_orm_active_enums::UserRole;
use crate::entities::users;

/// User repository backing the account store.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Converts a users row into a domain account.
///
/// # Errors
///
/// Returns `StoreError::InvalidRecord` for a student row without course or year.
pub(crate) fn to_account(model: users::Model) -> Result<Account, StoreError> {
    let profile = AccountProfile::from_parts(Role::from(model.role), model.course, model.year)
        .map_err(|e| StoreError::InvalidRecord(format!("user {}: {e}", model.id)))?;

    Ok(Account {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        profile,
        created_at: model.created_at.to_utc(),
    })
}

#[async_trait::async_trait]
impl AccountStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(store_err)?
            .map(to_account)
            .transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err)?
            .map(to_account)
            .transpose()
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(store_err)?;

        Ok(count > 0)
    }

    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        let now = chrono::Utc::now().into();
        let role = UserRole::from(account.profile.role());
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(account.name),
            email: Set(account.email),
            password_hash: Set(account.password_hash),
            role: Set(role),
            course: Set(account.profile.course().map(str::to_string)),
            year: Set(account.profile.year().map(str::to_string)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = user.insert(&self.db).await.map_err(store_err)?;
        to_account(model)
    }

    async fn count_by_role(&self, role: Role) -> Result<u64, StoreError> {
        users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::from(role)))
            .count(&self.db)
            .await
            .map_err(store_err)
    }
}
