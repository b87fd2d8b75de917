//! Provisioning service integration tests.
//!
//! These tests drive the provisioning flow against in-memory account stores
//! that enforce the same uniqueness semantics as the real table, without
//! requiring a database connection.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use keymint::domain::{Account, Password};
use keymint::errors::{AppError, AppResult};
use keymint::infra::AccountRepository;
use keymint::services::{Provisioner, ProvisioningService};

/// In-memory store whose insert enforces email uniqueness atomically.
#[derive(Default)]
struct InMemoryAccountStore {
    accounts: Mutex<HashMap<String, Account>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self.accounts.lock().unwrap().get(email).cloned())
    }

    async fn insert(&self, email: String, password_digest: String) -> AppResult<Account> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&email) {
            return Err(AppError::AccountExists);
        }
        let account = Account::new(Uuid::new_v4(), email.clone(), password_digest);
        accounts.insert(email, account.clone());
        Ok(account)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Store whose lookup is always stale, forcing every duplicate to be caught
/// by the insert-time uniqueness check instead of the pre-check.
#[derive(Default)]
struct StaleLookupStore {
    inner: InMemoryAccountStore,
}

#[async_trait]
impl AccountRepository for StaleLookupStore {
    async fn find_by_email(&self, _email: &str) -> AppResult<Option<Account>> {
        Ok(None)
    }

    async fn insert(&self, email: String, password_digest: String) -> AppResult<Account> {
        self.inner.insert(email, password_digest).await
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_provisioned_account_is_findable_with_salted_digest() {
    let store = Arc::new(InMemoryAccountStore::default());
    let service = Provisioner::new(store.clone());

    let created = service
        .provision("a@x.com".to_string(), "pw123".to_string())
        .await
        .unwrap();

    let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.email, "a@x.com");
    assert_ne!(found.password_digest, "pw123");

    // The stored digest verifies against the original plaintext only
    let stored = Password::from_digest(found.password_digest);
    assert!(stored.verify("pw123"));
    assert!(!stored.verify("other"));
}

#[tokio::test]
async fn test_identical_passwords_get_distinct_digests() {
    let store = Arc::new(InMemoryAccountStore::default());
    let service = Provisioner::new(store.clone());

    service
        .provision("a@x.com".to_string(), "shared-password".to_string())
        .await
        .unwrap();
    service
        .provision("b@x.com".to_string(), "shared-password".to_string())
        .await
        .unwrap();

    let first = store.find_by_email("a@x.com").await.unwrap().unwrap();
    let second = store.find_by_email("b@x.com").await.unwrap().unwrap();
    assert_ne!(first.password_digest, second.password_digest);
}

#[tokio::test]
async fn test_second_provision_for_same_email_is_rejected() {
    let store = Arc::new(InMemoryAccountStore::default());
    let service = Provisioner::new(store.clone());

    let first = service
        .provision("a@x.com".to_string(), "pw123".to_string())
        .await;
    assert!(first.is_ok());

    let second = service
        .provision("a@x.com".to_string(), "other".to_string())
        .await;
    assert!(matches!(second.unwrap_err(), AppError::AccountExists));

    assert_eq!(store.accounts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_input_is_rejected_without_writes() {
    let store = Arc::new(InMemoryAccountStore::default());
    let service = Provisioner::new(store.clone());

    let empty_email = service
        .provision(String::new(), "pw123".to_string())
        .await;
    assert!(matches!(empty_email.unwrap_err(), AppError::Validation(_)));

    let bad_email = service
        .provision("not-an-email".to_string(), "pw123".to_string())
        .await;
    assert!(matches!(bad_email.unwrap_err(), AppError::Validation(_)));

    let empty_password = service
        .provision("a@x.com".to_string(), String::new())
        .await;
    assert!(matches!(empty_password.unwrap_err(), AppError::Validation(_)));

    assert!(store.accounts.lock().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_provisions_have_exactly_one_winner() {
    let store = Arc::new(InMemoryAccountStore::default());
    let service = Arc::new(Provisioner::new(store.clone()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .provision("race@x.com".to_string(), format!("pw{}", i))
                .await
        }));
    }

    let mut successes = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(account) => {
                assert_eq!(account.email, "race@x.com");
                successes += 1;
            }
            Err(AppError::AccountExists) => duplicates += 1,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(store.accounts.lock().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_insert_constraint_wins_when_precheck_is_stale() {
    // Every task passes the lookup; the store's uniqueness check must still
    // leave exactly one winner
    let store = Arc::new(StaleLookupStore::default());
    let service = Arc::new(Provisioner::new(store.clone()));

    let mut handles = Vec::new();
    for i in 0..4 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .provision("race@x.com".to_string(), format!("pw{}", i))
                .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AppError::AccountExists) => {}
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(store.inner.accounts.lock().unwrap().len(), 1);
}
