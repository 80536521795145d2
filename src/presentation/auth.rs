use crate::domain::user::LoginRequest;
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::validation::required_text;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

/// Raw login form; fields are optional so absence can be reported by name.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

#[instrument(skip(state, form))]
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    let req = LoginRequest {
        email: required_text(form.email, "email")?,
        password: required_text(form.password, "password")?,
    };
    info!(email = %req.email, "Login request received");

    let token = state.auth_service.login(req).await.map_err(|e| {
        error!(error = %e, "Failed to login");
        ApiError::from(e)
    })?;

    info!("Login successful");
    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token: token,
    }))
}
