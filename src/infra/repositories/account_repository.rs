//! Account repository - persistence for provisioned accounts.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, SqlErr, Statement,
};
use uuid::Uuid;

use super::entities::account::{self, Entity as AccountEntity};
use crate::domain::Account;
use crate::errors::{AppError, AppResult};

/// Account repository trait for dependency injection.
///
/// `insert` is a single atomic statement; the unique index on email decides
/// the winner when two inserts for the same address race.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Insert a new account, failing with `AccountExists` when the email
    /// is already taken
    async fn insert(&self, email: String, password_digest: String) -> AppResult<Account>;

    /// Check store connectivity with a minimal round trip
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of AccountRepository backed by SeaORM.
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    /// Create new account store with a database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let result = AccountEntity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn insert(&self, email: String, password_digest: String) -> AppResult<Account> {
        let active_model = account::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_digest: Set(password_digest),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            // The store's unique index is the authoritative duplicate check
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::AccountExists,
                _ => AppError::from(e),
            }
        })?;

        Ok(Account::from(model))
    }

    async fn ping(&self) -> AppResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
