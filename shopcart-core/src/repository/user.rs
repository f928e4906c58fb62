//! User repository

use crate::domain::{NewUser, User, UserChanges};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, Transaction};

const USER_COLUMNS: &str = "id, email, username, password_hash, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, input: &NewUser) -> Result<User>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    /// Apply changes under a row lock. An unchanged username is dropped;
    /// the flag tells whether a write happened.
    async fn update(&self, id: i64, changes: &UserChanges) -> Result<(User, bool)>;
}

pub struct UserRepositoryImpl {
    pool: MySqlPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_in_tx(tx: &mut Transaction<'_, MySql>, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, input: &NewUser) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, username, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(&input.email)
        .bind(&input.username)
        .bind(&input.password_hash)
        .execute(&mut *tx)
        .await?;

        let user = Self::fetch_in_tx(&mut tx, result.last_insert_id() as i64)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create user")))?;

        tx.commit().await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> Result<(User, bool)> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ? FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let username = changes
            .username
            .as_ref()
            .filter(|u| **u != existing.username);
        if username.is_none() && changes.password_hash.is_none() {
            tx.commit().await?;
            return Ok((existing, false));
        }

        let password_hash = changes
            .password_hash
            .as_ref()
            .unwrap_or(&existing.password_hash);

        sqlx::query(
            r#"
            UPDATE users
            SET username = ?, password_hash = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(username.unwrap_or(&existing.username))
        .bind(password_hash)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let user = Self::fetch_in_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update user")))?;

        tx.commit().await?;
        Ok((user, true))
    }
}
