//! User API server
//!
//! Connects to PostgreSQL, ensures the `users` table exists and serves the
//! user CRUD endpoints until interrupted.

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;

use user_api::config::Config;
use user_api::state::AppState;
use user_api::user::UserService;
use user_api::{db, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let db_pool = db::create_pool(&config)
        .await
        .context("Failed to initialize database pool")?;

    db::check_health(&db_pool)
        .await
        .context("Database is not usable")?;

    db::init_schema(&db_pool)
        .await
        .context("Failed to initialize database schema")?;

    let user_service = Arc::new(UserService::with_pool(db_pool.clone()));
    let app = routes::router(
        AppState::new(user_service),
        config.cors_allowed_origins.as_deref(),
    );

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db_pool.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
