//! Database connection and schema management
//!
//! This module handles PostgreSQL connection pooling and the idempotent
//! creation of the `users` table.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::Config;

/// Table definition applied on every startup.
pub const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100),
        email VARCHAR(100) UNIQUE,
        age INT
    )
"#;

/// Database connection error
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to connect to database: {0}")]
    ConnectionError(String),

    #[error("Failed to create schema: {0}")]
    SchemaError(String),

    #[error("Database health check failed: {0}")]
    HealthCheckError(String),
}

/// Create a database connection pool
pub async fn create_pool(config: &Config) -> Result<PgPool, DbError> {
    tracing::info!("Connecting to database at {}", config.database_url_masked());

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .connect(&config.database_url)
        .await
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

    tracing::info!("Database connection pool created successfully");

    Ok(pool)
}

/// Ensure the `users` table exists
pub async fn init_schema(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Ensuring users table exists...");

    sqlx::query(CREATE_USERS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| DbError::SchemaError(e.to_string()))?;

    tracing::info!("Schema ready");

    Ok(())
}

/// Check database connectivity
pub async fn check_health(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| DbError::HealthCheckError(e.to_string()))?;

    Ok(())
}
