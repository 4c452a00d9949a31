//! Route table and middleware stack

mod user;

pub use user::user_routes;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::middleware;
use crate::state::AppState;

/// Build the application router.
///
/// `cors_allowed_origins` is a comma-separated origin list; `None` or an
/// empty string allows any origin.
pub fn router(state: AppState, cors_allowed_origins: Option<&str>) -> Router {
    Router::new()
        .merge(user_routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(configure_cors(cors_allowed_origins))
}

fn configure_cors(allowed_origins: Option<&str>) -> CorsLayer {
    let allowed_origins = allowed_origins.unwrap_or_default().trim();

    if allowed_origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}
