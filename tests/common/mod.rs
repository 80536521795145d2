#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Mutex;
use user_admin_api::domain::repository::UserRepository;
use user_admin_api::domain::user::{User, UserRole};
use user_admin_api::infrastructure::security::hash_password;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-api-tests";
pub const LOGIN_EMAIL: &str = "jsmith@gmail.com";
pub const LOGIN_PASSWORD: &str = "Password@1";

/// Stand-in persistence with canned answers. Mutations are recorded, never applied.
pub struct FakeUserRepository {
    users: Vec<User>,
    login_user: Option<User>,
    persists: bool,
    failure: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeUserRepository {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            login_user: None,
            persists: false,
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers `get_one` with an admin whose password is [`LOGIN_PASSWORD`].
    pub fn with_login_user(self) -> Self {
        self.with_login_role(UserRole::Admin)
    }

    pub fn with_login_role(mut self, role: UserRole) -> Self {
        let password_hash = hash_password(LOGIN_PASSWORD).expect("hash login password");
        let mut user = User::new("john smith", LOGIN_EMAIL, Some(role), Some(password_hash));
        user.id = 1;
        self.login_user = Some(user);
        self
    }

    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    pub fn with_persists(mut self, persists: bool) -> Self {
        self.persists = persists;
        self
    }

    /// Every data call except `get_one` fails with `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(message) => Err(anyhow!(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn get_one(&self, email: &str) -> Result<Option<User>> {
        Ok(self.login_user.clone().filter(|u| u.email == email))
    }

    async fn persists(&self, id: i64) -> Result<bool> {
        self.record(format!("persists:{}", id))?;
        Ok(self.persists)
    }

    async fn get_all(&self) -> Result<Vec<User>> {
        self.record("get_all".to_string())?;
        Ok(self.users.clone())
    }

    async fn add(&self, user: User) -> Result<()> {
        self.record(format!("add:{}", user.email))
    }

    async fn update(&self, user: User) -> Result<()> {
        self.record(format!("update:{}", user.id))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.record(format!("delete:{}", id))
    }
}

pub fn validator_error(field: &str) -> String {
    format!(
        "One or more of the required parameters was missing or invalid: \"{}\".",
        field
    )
}

/// Builds the full application around `$repo` (an `Arc` of any `UserRepository`).
macro_rules! setup_app {
    ($repo:expr) => {{
        let repository: std::sync::Arc<dyn user_admin_api::domain::repository::UserRepository> =
            $repo;
        let state = actix_web::web::Data::new(user_admin_api::presentation::handlers::AppState {
            user_service: user_admin_api::application::user_service::UserService::new(
                repository.clone(),
            ),
            auth_service: user_admin_api::application::auth_service::AuthService::new(
                repository,
                common::TEST_JWT_SECRET.to_string(),
                3600,
            ),
        });

        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(user_admin_api::presentation::middleware::TimingMiddleware)
                .wrap(user_admin_api::presentation::middleware::RequestIdMiddleware)
                .configure(user_admin_api::presentation::routes::configure(state)),
        )
        .await
    }};
}

/// Posts the login form and yields the access token, or an empty string on failure.
macro_rules! login {
    ($app:expr) => {
        login!($app, common::LOGIN_EMAIL, common::LOGIN_PASSWORD)
    };
    ($app:expr, $email:expr, $password:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/auth/login")
            .set_form([("email", $email), ("password", $password)])
            .to_request();
        let resp = actix_web::test::call_service($app, req).await;
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        body["accessToken"].as_str().unwrap_or_default().to_string()
    }};
}
