use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{LoginRequest, User, UserRole};
use crate::infrastructure::config::AdminSeed;
use crate::infrastructure::security::{Claims, generate_token, hash_password, verify_password};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};

pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    jwt_secret: String,
    token_ttl_secs: i64,
}

impl AuthService {
    pub fn new(user_repository: Arc<dyn UserRepository>, jwt_secret: String, token_ttl_secs: i64) -> Self {
        Self {
            user_repository,
            jwt_secret,
            token_ttl_secs,
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<String> {
        trace!("Starting login");

        let user = self
            .user_repository
            .get_one(&req.email)
            .await?
            .ok_or_else(|| {
                warn!("User not found during login");
                DomainError::EmailNotFound(req.email.clone())
            })?;

        let is_valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
            // Stored hash unreadable, treat like a wrong password
            warn!(user_id = user.id, error = %e, "Stored password hash could not be parsed");
            DomainError::Unauthorized
        })?;

        if !is_valid {
            warn!(user_id = user.id, "Invalid password during login");
            return Err(DomainError::Unauthorized.into());
        }

        let claims = Claims::for_user(&user, self.token_ttl_secs);
        let token = generate_token(&claims, &self.jwt_secret).map_err(|e| {
            error!(error = %e, "Failed to generate token");
            DomainError::Internal(format!("Failed to generate token: {}", e))
        })?;

        info!(user_id = user.id, role = ?user.role, "Login successful");
        Ok(token)
    }

    /// Creates the administrator account unless its email is already taken.
    /// Returns whether a user was added.
    #[instrument(skip(self, seed), fields(email = %seed.email))]
    pub async fn seed_admin(&self, seed: &AdminSeed) -> Result<bool> {
        if self.user_repository.get_one(&seed.email).await?.is_some() {
            debug!("Administrator already present, skipping seed");
            return Ok(false);
        }

        let password_hash = hash_password(&seed.password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let admin = User::new(
            seed.name.clone(),
            seed.email.clone(),
            Some(UserRole::Admin),
            Some(password_hash),
        );
        self.user_repository.add(admin).await?;
        info!("Administrator account seeded");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::user_repository::InMemoryUserRepository;
    use crate::infrastructure::security::validate_token;

    const SECRET: &str = "auth-service-test-secret";

    fn seed() -> AdminSeed {
        AdminSeed {
            name: "john smith".to_string(),
            email: "jsmith@gmail.com".to_string(),
            password: "Password@1".to_string(),
        }
    }

    async fn seeded_service() -> AuthService {
        let service = AuthService::new(Arc::new(InMemoryUserRepository::new()), SECRET.to_string(), 3600);
        assert!(service.seed_admin(&seed()).await.unwrap());
        service
    }

    fn login_req(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_admin_token() {
        let service = seeded_service().await;

        let token = service.login(login_req("jsmith@gmail.com", "Password@1")).await.unwrap();

        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.email, "jsmith@gmail.com");
        assert_eq!(claims.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let service = seeded_service().await;

        let err = service.login(login_req("jsmith@gmail.com", "nope")).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let service = seeded_service().await;

        let err = service.login(login_req("ghost@gmail.com", "Password@1")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::EmailNotFound(email)) if email == "ghost@gmail.com"
        ));
    }

    #[tokio::test]
    async fn test_login_with_unparsable_hash_is_unauthorized() {
        let repo = InMemoryUserRepository::with_users(vec![User::new(
            "legacy",
            "legacy@gmail.com",
            None,
            Some("plaintext".to_string()),
        )]);
        let service = AuthService::new(Arc::new(repo), SECRET.to_string(), 3600);

        let err = service.login(login_req("legacy@gmail.com", "plaintext")).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_seed_admin_is_idempotent() {
        let service = seeded_service().await;
        assert!(!service.seed_admin(&seed()).await.unwrap());
    }
}
