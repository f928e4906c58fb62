//! Product repository

use crate::domain::{CreateProductInput, Product, UpdateProductInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: &CreateProductInput) -> Result<Product>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>>;
    /// Diff `input` against the locked row and write only what differs.
    ///
    /// Returns the stored row and whether a write happened.
    async fn update(&self, id: i64, input: &UpdateProductInput) -> Result<(Product, bool)>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct ProductRepositoryImpl {
    pool: MySqlPool,
}

impl ProductRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryImpl {
    async fn create(&self, input: &CreateProductInput) -> Result<Product> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, category_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.category_id)
        .execute(&mut *tx)
        .await?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category_id, created_at, updated_at
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(result.last_insert_id() as i64)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create product")))?;

        tx.commit().await?;
        Ok(product)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category_id, created_at, updated_at
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category_id, created_at, updated_at
            FROM products
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn update(&self, id: i64, input: &UpdateProductInput) -> Result<(Product, bool)> {
        let mut tx = self.pool.begin().await?;

        let mut product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category_id, created_at, updated_at
            FROM products
            WHERE id = ?
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        let changes = product.diff(input);
        if changes.is_empty() {
            tx.commit().await?;
            return Ok((product, false));
        }
        product.apply(&changes);

        sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, price = ?, category_id = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.category_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category_id, created_at, updated_at
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update product")))?;

        tx.commit().await?;
        Ok((product, true))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        // cart_items referencing the product are removed by ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        Ok(())
    }
}
