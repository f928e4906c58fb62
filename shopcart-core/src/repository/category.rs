//! Category repository

use crate::domain::{Category, CreateCategoryInput, UpdateCategoryInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, input: &CreateCategoryInput) -> Result<Category>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Category>>;
    /// Rename under a row lock; the flag tells whether a write happened
    async fn update(&self, id: i64, input: &UpdateCategoryInput) -> Result<(Category, bool)>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct CategoryRepositoryImpl {
    pool: MySqlPool,
}

impl CategoryRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryImpl {
    async fn create(&self, input: &CreateCategoryInput) -> Result<Category> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO categories (name, created_at, updated_at)
            VALUES (?, NOW(), NOW())
            "#,
        )
        .bind(&input.name)
        .execute(&mut *tx)
        .await?;

        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories WHERE id = ?",
        )
        .bind(result.last_insert_id() as i64)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create category")))?;

        tx.commit().await?;
        Ok(category)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        // Column collation is utf8mb4_bin, so this match is case-sensitive
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn update(&self, id: i64, input: &UpdateCategoryInput) -> Result<(Category, bool)> {
        let mut tx = self.pool.begin().await?;

        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories WHERE id = ? FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        let Some(name) = category.renamed_to(input) else {
            tx.commit().await?;
            return Ok((category, false));
        };

        sqlx::query(
            r#"
            UPDATE categories
            SET name = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update category")))?;

        tx.commit().await?;
        Ok((category, true))
    }

    /// Fails with a foreign key violation while products still reference the row
    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        Ok(())
    }
}
