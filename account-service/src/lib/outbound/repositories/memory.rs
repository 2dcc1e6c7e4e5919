use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::AccountError;

/// In-memory user directory.
///
/// Backs the integration test harness and database-less local runs.
/// Mirrors the storage contract of the Postgres adapter, including the
/// uniqueness constraint on email.
pub struct InMemoryUserRepository {
    inner: Mutex<Store>,
}

struct Store {
    next_id: i64,
    users: Vec<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Store {
                next_id: 1,
                users: Vec::new(),
            }),
        }
    }

    /// Remove a user by id, returning whether one was removed.
    ///
    /// Not part of the directory contract; exists so tests can exercise
    /// tokens whose subject no longer resolves.
    pub fn remove(&self, id: &UserId) -> bool {
        let Ok(mut store) = self.inner.lock() else {
            return false;
        };
        let before = store.users.len();
        store.users.retain(|u| u.id != *id);
        store.users.len() < before
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Store>, AccountError> {
        self.inner
            .lock()
            .map_err(|_| AccountError::Repository("user store lock poisoned".to_string()))
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AccountError> {
        let mut store = self.lock()?;

        if store
            .users
            .iter()
            .any(|u| u.email.as_str() == new_user.email.as_str())
        {
            return Err(AccountError::EmailAlreadyExists(
                new_user.email.as_str().to_string(),
            ));
        }

        let user = User {
            id: UserId(store.next_id),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        store.next_id += 1;
        store.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        let store = self.lock()?;
        Ok(store.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        let store = self.lock()?;
        Ok(store
            .users
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }
}
