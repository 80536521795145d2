use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

const MAX_USER_ID: i64 = 1_000_000_000_000;

/// Insertion-ordered user store.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            storage: Arc::new(RwLock::new(users)),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn next_free_id(storage: &[User]) -> i64 {
    loop {
        let candidate = fastrand::i64(1..MAX_USER_ID);
        if !storage.iter().any(|u| u.id == candidate) {
            return candidate;
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self), fields(email = email))]
    async fn get_one(&self, email: &str) -> Result<Option<User>> {
        trace!("Acquiring read lock for user storage");
        let storage = self.storage.read().await;
        let user = storage.iter().find(|u| u.email == email).cloned();
        match &user {
            Some(u) => debug!(user_id = u.id, "User found in storage"),
            None => trace!("User not found in storage"),
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn persists(&self, id: i64) -> Result<bool> {
        let storage = self.storage.read().await;
        Ok(storage.iter().any(|u| u.id == id))
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<User>> {
        let storage = self.storage.read().await;
        trace!(count = storage.len(), "Listing users from storage");
        Ok(storage.clone())
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn add(&self, mut user: User) -> Result<()> {
        trace!("Acquiring write lock for user storage");
        let mut storage = self.storage.write().await;
        if user.id <= 0 || storage.iter().any(|u| u.id == user.id) {
            user.id = next_free_id(&storage);
        }
        debug!(user_id = user.id, email = %user.email, "User saved to memory storage");
        storage.push(user);
        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    async fn update(&self, user: User) -> Result<()> {
        let mut storage = self.storage.write().await;
        if let Some(slot) = storage.iter_mut().find(|u| u.id == user.id) {
            *slot = user;
            debug!("User updated in memory storage");
        } else {
            trace!("Update skipped, no user with this id");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<()> {
        let mut storage = self.storage.write().await;
        let before = storage.len();
        storage.retain(|u| u.id != id);
        debug!(removed = before - storage.len(), "Delete applied to memory storage");
        Ok(())
    }
}
