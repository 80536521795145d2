use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<User>> {
        self.repository.get_all().await
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn add_one(&self, user: User) -> Result<()> {
        self.repository.add(user).await?;
        info!("User added");
        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn update_one(&self, user: User) -> Result<()> {
        self.ensure_exists(user.id).await?;
        self.repository.update(user).await?;
        info!("User updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.ensure_exists(id).await?;
        self.repository.delete(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn ensure_exists(&self, id: i64) -> Result<()> {
        if !self.repository.persists(id).await? {
            warn!(user_id = id, "User does not exist");
            return Err(DomainError::UserNotFound.into());
        }
        Ok(())
    }
}
