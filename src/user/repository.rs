//! Persistence for user records

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::user::model::{User, UserRequest};

/// Storage failures
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepositoryError::DuplicateEmail
            }
            _ => RepositoryError::Database(err),
        }
    }
}

/// Storage operations backing the user endpoints.
///
/// Each method issues a single statement. Update and delete return the number
/// of affected rows.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: &UserRequest) -> Result<User, RepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError>;

    async fn update(&self, id: i32, user: &UserRequest) -> Result<u64, RepositoryError>;

    async fn delete(&self, id: i32) -> Result<u64, RepositoryError>;
}

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgUserRepository {
    db_pool: PgPool,
}

impl PgUserRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: &UserRequest) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, age)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, age
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.age)
        .fetch_one(&self.db_pool)
        .await
        .map_err(RepositoryError::from_write)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email, age FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(user)
    }

    async fn update(&self, id: i32, user: &UserRequest) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE users SET name = $1, email = $2, age = $3 WHERE id = $4")
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.age)
            .bind(id)
            .execute(&self.db_pool)
            .await
            .map_err(RepositoryError::from_write)?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected())
    }
}
