use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tracing::{error, info, instrument};
use user_admin_api::application::auth_service::AuthService;
use user_admin_api::application::user_service::UserService;
use user_admin_api::data::user_repository::InMemoryUserRepository;
use user_admin_api::domain::repository::UserRepository;
use user_admin_api::infrastructure::config::AppConfig;
use user_admin_api::infrastructure::logging::init_logging;
use user_admin_api::presentation::handlers::AppState;
use user_admin_api::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use user_admin_api::presentation::routes::{self, ROUTES};

fn cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header(),
        None => Cors::permissive(),
    }
}

#[tokio::main]
#[instrument]
async fn main() -> std::io::Result<()> {
    init_logging();
    info!("Logging initialized successfully");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let repository: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
    let auth_service = AuthService::new(
        repository.clone(),
        config.jwt_secret.clone(),
        config.token_ttl_secs,
    );

    if let Some(seed) = &config.admin_seed {
        auth_service.seed_admin(seed).await.map_err(|e| {
            error!(error = %e, "Failed to seed administrator");
            std::io::Error::other(e.to_string())
        })?;
    }

    let state = web::Data::new(AppState {
        user_service: UserService::new(repository),
        auth_service,
    });
    info!("Application state initialized");

    let cors_origin = config.cors_allowed_origin.clone();
    let server = HttpServer::new(move || {
        tracing::trace!("Creating new application instance");
        App::new()
            .wrap(cors(cors_origin.as_deref()))
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .configure(routes::configure(state.clone()))
    });

    let bind_addr = format!("{}:{}", config.host, config.port);
    let server = server.bind((config.host.as_str(), config.port))?;
    info!(address = %bind_addr, routes = %ROUTES, "Starting HTTP server");
    server.run().await
}
