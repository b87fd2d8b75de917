//! Provisioning service - Orchestrates account creation.
//!
//! Validates the credential pair, checks email uniqueness, hashes the
//! password and persists the account as one logical operation.

use async_trait::async_trait;
use std::sync::Arc;
use validator::ValidateEmail;

use crate::domain::{Account, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::AccountRepository;

/// Provisioning service trait for dependency injection.
#[async_trait]
pub trait ProvisioningService: Send + Sync {
    /// Provision a new account for the given credential pair.
    ///
    /// Exactly one persisted write on success; zero writes on any failure
    /// path. Duplicate emails fail with [`AppError::AccountExists`] whether
    /// the pre-check or the store's unique index caught them.
    async fn provision(&self, email: String, password: String) -> AppResult<Account>;
}

/// Concrete implementation of ProvisioningService.
pub struct Provisioner {
    store: Arc<dyn AccountRepository>,
}

impl Provisioner {
    /// Create new provisioning service instance with an account store
    pub fn new(store: Arc<dyn AccountRepository>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProvisioningService for Provisioner {
    async fn provision(&self, email: String, password: String) -> AppResult<Account> {
        if email.is_empty() || !email.validate_email() {
            return Err(AppError::validation("Invalid email address"));
        }
        if password.is_empty() {
            return Err(AppError::validation("Password must not be empty"));
        }

        // Fast duplicate check for the common case; not authoritative under
        // concurrency
        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AppError::AccountExists);
        }

        let password_digest = Password::new(&password)?.into_string();

        // A concurrent signup that slipped past the pre-check loses here on
        // the store's unique index and surfaces as the same AccountExists
        self.store.insert(email, password_digest).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use sea_orm::DbErr;
    use uuid::Uuid;

    use crate::infra::repositories::MockAccountRepository;

    fn provisioner(store: MockAccountRepository) -> Provisioner {
        Provisioner::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_provision_creates_account() {
        let mut store = MockAccountRepository::new();
        store
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .returning(|_| Ok(None));
        store
            .expect_insert()
            .returning(|email, digest| Ok(Account::new(Uuid::new_v4(), email, digest)));

        let result = provisioner(store)
            .provision("a@x.com".to_string(), "pw123".to_string())
            .await;

        let account = result.unwrap();
        assert_eq!(account.email, "a@x.com");
        assert_ne!(account.password_digest, "pw123");
    }

    #[tokio::test]
    async fn test_provision_rejects_existing_email_without_insert() {
        let mut store = MockAccountRepository::new();
        store.expect_find_by_email().returning(|email| {
            Ok(Some(Account::new(
                Uuid::new_v4(),
                email.to_string(),
                "digest".to_string(),
            )))
        });
        store.expect_insert().never();

        let result = provisioner(store)
            .provision("a@x.com".to_string(), "other".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::AccountExists));
    }

    #[tokio::test]
    async fn test_provision_translates_lost_insert_race() {
        // Pre-check passes but a concurrent signup commits first; the store
        // reports the constraint violation
        let mut store = MockAccountRepository::new();
        store.expect_find_by_email().returning(|_| Ok(None));
        store
            .expect_insert()
            .returning(|_, _| Err(AppError::AccountExists));

        let result = provisioner(store)
            .provision("a@x.com".to_string(), "pw123".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::AccountExists));
    }

    #[tokio::test]
    async fn test_provision_rejects_invalid_email_before_store_access() {
        // No expectations set: any store call would panic the mock
        let store = MockAccountRepository::new();

        let result = provisioner(store)
            .provision("not-an-email".to_string(), "pw123".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_provision_rejects_empty_email() {
        let store = MockAccountRepository::new();

        let result = provisioner(store)
            .provision(String::new(), "pw123".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_provision_rejects_empty_password() {
        let store = MockAccountRepository::new();

        let result = provisioner(store)
            .provision("a@x.com".to_string(), String::new())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_provision_propagates_store_failure() {
        let mut store = MockAccountRepository::new();
        store
            .expect_find_by_email()
            .returning(|_| Err(AppError::Store(DbErr::Custom("connection refused".to_string()))));

        let result = provisioner(store)
            .provision("a@x.com".to_string(), "pw123".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Store(_)));
    }
}
