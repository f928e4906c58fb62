//! Cart and cart item repository

use crate::domain::{Cart, CartItem, CreateCartItemInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn create(&self, user_id: i64) -> Result<Cart>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Cart>>;
    async fn find_by_user(&self, user_id: i64) -> Result<Option<Cart>>;
    /// Delete the user's cart and return its id; its items go with it
    async fn delete_for_user(&self, user_id: i64) -> Result<i64>;

    /// Add an item to a cart owned by `user_id`, checking cart and product under lock
    async fn create_item(
        &self,
        cart_id: i64,
        user_id: i64,
        input: &CreateCartItemInput,
    ) -> Result<CartItem>;
    async fn find_item(&self, id: i64) -> Result<Option<CartItem>>;
    async fn list_items(&self, cart_id: i64, offset: i64, limit: i64) -> Result<Vec<CartItem>>;
    async fn list_all_items(&self, cart_id: i64) -> Result<Vec<CartItem>>;
    /// Set the quantity under a row lock; the flag tells whether a write happened
    async fn update_item_quantity(&self, id: i64, quantity: i32) -> Result<(CartItem, bool)>;
    /// Delete an item only if it sits in a cart owned by `user_id`
    async fn delete_item(&self, id: i64, user_id: i64) -> Result<()>;
}

pub struct CartRepositoryImpl {
    pool: MySqlPool,
}

impl CartRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for CartRepositoryImpl {
    async fn create(&self, user_id: i64) -> Result<Cart> {
        let mut tx = self.pool.begin().await?;

        // UNIQUE(user_id) rejects a second cart even when two requests race
        let result = sqlx::query("INSERT INTO carts (user_id, created_at) VALUES (?, NOW())")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let cart = sqlx::query_as::<_, Cart>(
            "SELECT id, user_id, created_at FROM carts WHERE id = ?",
        )
        .bind(result.last_insert_id() as i64)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create cart")))?;

        tx.commit().await?;
        Ok(cart)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Cart>> {
        let cart = sqlx::query_as::<_, Cart>(
            r#"
            SELECT id, user_id, created_at
            FROM carts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cart)
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Option<Cart>> {
        let cart = sqlx::query_as::<_, Cart>(
            r#"
            SELECT id, user_id, created_at
            FROM carts
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cart)
    }

    async fn delete_for_user(&self, user_id: i64) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let (cart_id,): (i64,) =
            sqlx::query_as("SELECT id FROM carts WHERE user_id = ? FOR UPDATE")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Cart not found".to_string()))?;

        // cart_items rows are removed by ON DELETE CASCADE
        sqlx::query("DELETE FROM carts WHERE id = ?")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(cart_id)
    }

    async fn create_item(
        &self,
        cart_id: i64,
        user_id: i64,
        input: &CreateCartItemInput,
    ) -> Result<CartItem> {
        let mut tx = self.pool.begin().await?;

        // Someone else's cart is reported exactly like a missing one
        let owned: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM carts WHERE id = ? AND user_id = ? FOR UPDATE")
                .bind(cart_id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        if owned.is_none() {
            return Err(AppError::NotFound(
                "Cart not found or does not belong to user".to_string(),
            ));
        }

        let product: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM products WHERE id = ? LOCK IN SHARE MODE")
                .bind(input.product_id)
                .fetch_optional(&mut *tx)
                .await?;
        if product.is_none() {
            return Err(AppError::NotFound("Product not found".to_string()));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO cart_items (cart_id, product_id, quantity, created_at, updated_at)
            VALUES (?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(cart_id)
        .bind(input.product_id)
        .bind(input.quantity)
        .execute(&mut *tx)
        .await?;

        let item = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT id, cart_id, product_id, quantity, created_at, updated_at
            FROM cart_items
            WHERE id = ?
            "#,
        )
        .bind(result.last_insert_id() as i64)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create cart item")))?;

        tx.commit().await?;
        Ok(item)
    }

    async fn find_item(&self, id: i64) -> Result<Option<CartItem>> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT id, cart_id, product_id, quantity, created_at, updated_at
            FROM cart_items
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn list_items(&self, cart_id: i64, offset: i64, limit: i64) -> Result<Vec<CartItem>> {
        let items = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT id, cart_id, product_id, quantity, created_at, updated_at
            FROM cart_items
            WHERE cart_id = ?
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(cart_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn list_all_items(&self, cart_id: i64) -> Result<Vec<CartItem>> {
        let items = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT id, cart_id, product_id, quantity, created_at, updated_at
            FROM cart_items
            WHERE cart_id = ?
            ORDER BY id
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn update_item_quantity(&self, id: i64, quantity: i32) -> Result<(CartItem, bool)> {
        let mut tx = self.pool.begin().await?;

        let item = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT id, cart_id, product_id, quantity, created_at, updated_at
            FROM cart_items
            WHERE id = ?
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;

        if item.quantity == quantity {
            tx.commit().await?;
            return Ok((item, false));
        }

        sqlx::query("UPDATE cart_items SET quantity = ?, updated_at = NOW() WHERE id = ?")
            .bind(quantity)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let item = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT id, cart_id, product_id, quantity, created_at, updated_at
            FROM cart_items
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update cart item")))?;

        tx.commit().await?;
        Ok((item, true))
    }

    async fn delete_item(&self, id: i64, user_id: i64) -> Result<()> {
        // Ownership and existence are checked by the same statement
        let result = sqlx::query(
            r#"
            DELETE ci FROM cart_items ci
            JOIN carts c ON c.id = ci.cart_id
            WHERE ci.id = ? AND c.user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cart item not found".to_string()));
        }

        Ok(())
    }
}
