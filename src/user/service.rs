use std::sync::Arc;

use sqlx::PgPool;
use validator::Validate;

use crate::error::ApiError;
use crate::user::model::{User, UserRequest};
use crate::user::repository::{PgUserRepository, RepositoryError, UserRepository};

/// User CRUD operations over an injected repository
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Service backed by the PostgreSQL repository
    pub fn with_pool(db_pool: PgPool) -> Self {
        Self::new(Arc::new(PgUserRepository::new(db_pool)))
    }

    pub async fn create_user(&self, request: UserRequest) -> Result<User, ApiError> {
        request.validate()?;

        let user = self
            .repository
            .insert(&request)
            .await
            .map_err(|e| storage_failure(e, "Error creating user"))?;

        tracing::info!(user_id = user.id, "User created");

        Ok(user)
    }

    pub async fn get_user(&self, id: i32) -> Result<User, ApiError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| storage_failure(e, "Error fetching user"))?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Replace name, email and age. A missing id is not an error.
    pub async fn update_user(&self, id: i32, request: UserRequest) -> Result<(), ApiError> {
        request.validate()?;

        let rows = self
            .repository
            .update(id, &request)
            .await
            .map_err(|e| storage_failure(e, "Error updating user"))?;

        if rows == 0 {
            tracing::debug!(user_id = id, "Update matched no user");
        } else {
            tracing::info!(user_id = id, "User updated");
        }

        Ok(())
    }

    /// Remove a user. Deleting an absent id succeeds.
    pub async fn delete_user(&self, id: i32) -> Result<(), ApiError> {
        let rows = self
            .repository
            .delete(id)
            .await
            .map_err(|e| storage_failure(e, "Error deleting user"))?;

        if rows == 0 {
            tracing::debug!(user_id = id, "Delete matched no user");
        } else {
            tracing::info!(user_id = id, "User deleted");
        }

        Ok(())
    }
}

fn storage_failure(err: RepositoryError, message: &str) -> ApiError {
    match &err {
        RepositoryError::DuplicateEmail => {
            tracing::warn!(error = %err, "{}", message);
        }
        RepositoryError::Database(_) => {
            tracing::error!(error = %err, "{}", message);
        }
    }
    ApiError::DatabaseError(message.to_string())
}
