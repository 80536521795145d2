use crate::domain::user::UserRole;
use crate::presentation::auth::login;
use crate::presentation::handlers::{
    AppState, add_user, delete_user, get_all_users, health_check, update_user,
};
use crate::presentation::middleware::JwtAuthMiddleware;
use crate::presentation::validation::{form_config, json_config};
use actix_web::web;

pub const ROUTES: &str = "GET /api/health, POST /api/auth/login, GET /api/users, POST /api/users, PUT /api/users, DELETE /api/users/{id}";

/// Mounts the `/api` tree. The users scope is reserved for admins.
pub fn configure(state: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let secret = state.auth_service.jwt_secret().to_string();
        cfg.app_data(state).service(
            web::scope("/api")
                .route("/health", web::get().to(health_check))
                .service(
                    web::scope("/auth")
                        .app_data(form_config("email"))
                        .route("/login", web::post().to(login)),
                )
                .service(
                    web::scope("/users")
                        .app_data(json_config("user"))
                        .wrap(JwtAuthMiddleware::new(secret, UserRole::Admin))
                        .route("", web::get().to(get_all_users))
                        .route("", web::post().to(add_user))
                        .route("", web::put().to(update_user))
                        .route("/{id}", web::delete().to(delete_user)),
                ),
        );
    }
}
