use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

/// Request body for creating or replacing a user
///
/// `name` and `email` must be present and not blank; both are capped at the
/// `VARCHAR(100)` width of their columns. `age` may be omitted or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserRequest {
    #[validate(
        custom = "not_blank",
        length(max = 100, message = "name must be at most 100 characters")
    )]
    pub name: String,

    #[validate(
        custom = "not_blank",
        length(max = 100, message = "email must be at most 100 characters")
    )]
    pub email: String,

    #[serde(default)]
    pub age: Option<i32>,
}

impl UserRequest {
    /// Attach a storage-assigned id
    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

/// Error code reported for empty or whitespace-only fields
pub const BLANK: &str = "blank";

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(BLANK));
    }
    Ok(())
}
