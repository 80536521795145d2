pub mod auth;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod validation;
