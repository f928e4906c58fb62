//! Cart and cart item business logic

use crate::domain::{Cart, CartItem, CartWithItems, CreateCartItemInput, UpdateCartItemInput};
use crate::error::{AppError, Result};
use crate::repository::{is_foreign_key_violation, is_unique_violation, CartRepository};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

pub struct CartService<R: CartRepository> {
    repo: Arc<R>,
}

fn cart_exists() -> AppError {
    AppError::Conflict("User already has a cart".to_string())
}

fn cart_not_found() -> AppError {
    AppError::NotFound("Cart not found".to_string())
}

fn cart_item_not_found() -> AppError {
    AppError::NotFound("Cart item not found".to_string())
}

impl<R: CartRepository> CartService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create the caller's cart; a user owns at most one
    pub async fn create_cart(&self, user_id: i64) -> Result<CartWithItems> {
        if self.repo.find_by_user(user_id).await?.is_some() {
            return Err(cart_exists());
        }

        let cart = self.repo.create(user_id).await.map_err(|e| {
            if is_unique_violation(&e) {
                cart_exists()
            } else {
                e
            }
        })?;

        info!(cart_id = cart.id, user_id, "cart created");
        Ok(CartWithItems {
            cart,
            items: Vec::new(),
        })
    }

    pub async fn get_cart(&self, user_id: i64) -> Result<CartWithItems> {
        let cart = self.owned_cart(user_id).await?;
        let items = self.repo.list_all_items(cart.id).await?;
        Ok(CartWithItems { cart, items })
    }

    pub async fn delete_cart(&self, user_id: i64) -> Result<()> {
        let cart_id = self.repo.delete_for_user(user_id).await?;
        info!(cart_id, user_id, "cart deleted");
        Ok(())
    }

    async fn owned_cart(&self, user_id: i64) -> Result<Cart> {
        self.repo
            .find_by_user(user_id)
            .await?
            .ok_or_else(cart_not_found)
    }

    /// Page through the items of any existing cart
    pub async fn list_cart_items(
        &self,
        cart_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CartItem>> {
        if self.repo.find_by_id(cart_id).await?.is_none() {
            return Err(cart_not_found());
        }
        self.repo.list_items(cart_id, offset, limit).await
    }

    /// Add a product to a cart the caller owns
    pub async fn create_cart_item(
        &self,
        cart_id: i64,
        user_id: i64,
        input: CreateCartItemInput,
    ) -> Result<CartItem> {
        input.validate()?;

        let item = self
            .repo
            .create_item(cart_id, user_id, &input)
            .await
            .map_err(|e| match e {
                AppError::NotFound(msg) => {
                    warn!(cart_id, user_id, product_id = input.product_id, "{}", msg);
                    AppError::NotFound(msg)
                }
                e if is_foreign_key_violation(&e) => {
                    AppError::NotFound("Cart or product no longer exists".to_string())
                }
                e => e,
            })?;

        info!(
            cart_item_id = item.id,
            cart_id,
            product_id = item.product_id,
            quantity = item.quantity,
            "cart item created"
        );
        Ok(item)
    }

    pub async fn get_cart_item(&self, id: i64) -> Result<CartItem> {
        self.repo
            .find_item(id)
            .await?
            .ok_or_else(|| {
                warn!(cart_item_id = id, "cart item not found");
                cart_item_not_found()
            })
    }

    /// Set the quantity of an item; repeating the same quantity writes nothing
    pub async fn update_cart_item(&self, id: i64, input: UpdateCartItemInput) -> Result<CartItem> {
        input.validate()?;

        let (item, written) = self.repo.update_item_quantity(id, input.quantity).await?;
        if written {
            info!(cart_item_id = id, new_quantity = item.quantity, "cart item updated");
        }
        Ok(item)
    }

    /// Remove an item from a cart the caller owns
    pub async fn delete_cart_item(&self, id: i64, user_id: i64) -> Result<()> {
        self.repo.delete_item(id, user_id).await.inspect_err(|e| {
            if matches!(e, AppError::NotFound(_)) {
                warn!(cart_item_id = id, user_id, "cart item not found or not owned by user");
            }
        })?;
        info!(cart_item_id = id, user_id, "cart item deleted");
        Ok(())
    }
}
