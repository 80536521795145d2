use crate::application::auth_service::AuthService;
use crate::application::user_service::UserService;
use crate::domain::error::DomainError;
use crate::domain::user::User;
use crate::presentation::middleware::AuthenticatedUser;
use crate::presentation::validation::{parse_id, required_user, validation_message};
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpResponse, ResponseError, web};
use chrono::Utc;
use serde::Serialize;
use std::pin::Pin;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

pub const USER_NOT_FOUND: &str = "User not found";

pub struct AppState {
    pub user_service: UserService,
    pub auth_service: AuthService,
}

// Every failure is rendered as this envelope
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", validation_message(.0))]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("Forbidden")]
    Forbidden,
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Unauthorized".to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        if status.is_server_error() {
            error!(error = %error_msg, status = %status, "Request failed");
        } else {
            warn!(error = %error_msg, status = %status, "Request rejected");
        }

        HttpResponse::build(status).json(ErrorResponse { error: error_msg })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::UserNotFound) => ApiError::NotFound(USER_NOT_FOUND.to_string()),
            Some(e @ DomainError::EmailNotFound(_)) => ApiError::Unauthorized(e.to_string()),
            Some(DomainError::Unauthorized) => ApiError::unauthorized(),
            Some(DomainError::Internal(msg)) => ApiError::Internal(msg.clone()),
            // Repository failures carry no domain meaning
            None => ApiError::Internal(err.to_string()),
        }
    }
}

// AuthenticatedUser extractor
impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        Box::pin(async move { user.ok_or_else(ApiError::unauthorized) })
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[derive(Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    info!("Health check requested");
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[instrument(skip(state, actor), fields(actor_id = actor.0.sub))]
pub async fn get_all_users(
    state: web::Data<AppState>,
    actor: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let users = state.user_service.get_all().await.map_err(|e| {
        error!(error = %e, "Failed to list users");
        e
    })?;
    info!(count = users.len(), "Users listed");
    Ok(HttpResponse::Ok().json(UsersResponse { users }))
}

#[instrument(skip(state, actor, body), fields(actor_id = actor.0.sub))]
pub async fn add_user(
    state: web::Data<AppState>,
    actor: AuthenticatedUser,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    let user = required_user(&body, "user")?;
    info!(email = %user.email, "Adding user");
    state.user_service.add_one(user).await?;
    Ok(HttpResponse::Created().finish())
}

#[instrument(skip(state, actor, body), fields(actor_id = actor.0.sub, user_id))]
pub async fn update_user(
    state: web::Data<AppState>,
    actor: AuthenticatedUser,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    let user = required_user(&body, "user")?;
    tracing::Span::current().record("user_id", user.id);
    info!("Updating user");
    state.user_service.update_one(user).await?;
    Ok(HttpResponse::Ok().finish())
}

#[instrument(skip(state, actor), fields(actor_id = actor.0.sub, raw_id = %path.as_str()))]
pub async fn delete_user(
    state: web::Data<AppState>,
    actor: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path, "id")?;
    info!(user_id = id, "Deleting user");
    state.user_service.delete(id).await?;
    Ok(HttpResponse::Ok().finish())
}
