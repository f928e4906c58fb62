//! Signup and login

use crate::crypto::{hash_password, verify_password, DUMMY_PASSWORD_HASH};
use crate::domain::{LoginInput, NewUser, SignupInput, User};
use crate::error::{AppError, Result};
use crate::jwt::JwtManager;
use crate::repository::{is_unique_violation, UserRepository};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Same message for unknown email and wrong password
const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub struct AuthService<U: UserRepository> {
    user_repo: Arc<U>,
    jwt_manager: JwtManager,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: Arc<U>, jwt_manager: JwtManager) -> Self {
        Self {
            user_repo,
            jwt_manager,
        }
    }

    pub async fn signup(&self, input: SignupInput) -> Result<User> {
        input.validate()?;

        let result = self.register(input).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(AppError::Conflict(_)) => "conflict",
            Err(_) => "error",
        };
        metrics::counter!("shopcart_auth_signup_total", "result" => outcome).increment(1);

        result
    }

    async fn register(&self, input: SignupInput) -> Result<User> {
        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        if self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let new_user = NewUser {
            password_hash: hash_password(&input.password)?,
            email: input.email,
            username: input.username,
        };

        let user = self.user_repo.create(&new_user).await.map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Email or username already registered".to_string())
            } else {
                e
            }
        })?;

        info!(user_id = user.id, "user signed up");
        Ok(user)
    }

    /// Check credentials and issue a session token
    pub async fn login(&self, input: LoginInput) -> Result<(User, String)> {
        input.validate()?;

        let result = self.authenticate(&input).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(AppError::Unauthorized(_)) => "invalid_credentials",
            Err(_) => "error",
        };
        metrics::counter!("shopcart_auth_login_total", "result" => outcome).increment(1);

        let user = result?;
        let token = self.jwt_manager.issue_session_token(user.id)?;
        info!(user_id = user.id, "user logged in");
        Ok((user, token))
    }

    async fn authenticate(&self, input: &LoginInput) -> Result<User> {
        let user = self.user_repo.find_by_email(&input.email).await?;

        // Unknown emails still run a full verification.
        let stored_hash = user
            .as_ref()
            .map_or(DUMMY_PASSWORD_HASH, |u| u.password_hash.as_str());
        let password_ok = verify_password(&input.password, stored_hash);

        match user {
            Some(user) if password_ok => Ok(user),
            Some(user) => {
                warn!(user_id = user.id, "login attempt with wrong password");
                Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))
            }
            None => {
                warn!("login attempt for unknown email");
                Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))
            }
        }
    }
}
