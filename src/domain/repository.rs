use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_one(&self, email: &str) -> Result<Option<User>>;
    async fn persists(&self, id: i64) -> Result<bool>;
    async fn get_all(&self) -> Result<Vec<User>>;
    async fn add(&self, user: User) -> Result<()>;
    async fn update(&self, user: User) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
}
