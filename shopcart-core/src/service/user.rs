//! Profile reads and updates for the signed-in user

use crate::crypto::hash_password;
use crate::domain::{UpdateProfileInput, User, UserChanges};
use crate::error::{AppError, Result};
use crate::repository::{is_unique_violation, UserRepository};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_profile(&self, user_id: i64) -> Result<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Change username and/or password; writes only when something changed
    pub async fn update_profile(&self, user_id: i64, input: UpdateProfileInput) -> Result<User> {
        input.validate()?;

        if let Some(username) = input.username.as_deref() {
            if let Some(other) = self.repo.find_by_username(username).await? {
                if other.id != user_id {
                    return Err(AppError::Conflict("Username already taken".to_string()));
                }
            }
        }

        // A supplied password is always re-hashed, the salt differs anyway
        let changes = UserChanges {
            username: input.username,
            password_hash: input.password.as_deref().map(hash_password).transpose()?,
        };
        if changes.is_empty() {
            return self.get_profile(user_id).await;
        }

        let (user, written) = self.repo.update(user_id, &changes).await.map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Username already taken".to_string())
            } else {
                e
            }
        })?;

        if written {
            info!(
                user_id,
                password_changed = changes.password_hash.is_some(),
                "profile updated"
            );
        }
        Ok(user)
    }
}
