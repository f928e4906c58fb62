//! User domain model

use super::common::validate_not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    /// argon2 PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for User {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            email: String::new(),
            username: String::new(),
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Input for signing up
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 50), custom(function = "validate_not_blank"))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Input for logging in
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Input for updating the caller's own profile
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileInput {
    #[validate(length(min = 1, max = 50), custom(function = "validate_not_blank"))]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub password: Option<String>,
}

/// Row values for a new user, password already hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Fields of a user row to overwrite
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password_hash.is_none()
    }
}
