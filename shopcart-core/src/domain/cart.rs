//! Cart and cart item domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Cart entity, at most one per user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cart {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Self {
            id: 0,
            user_id: 0,
            created_at: Utc::now(),
        }
    }
}

/// Line of a cart
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    pub id: i64,
    pub cart_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for CartItem {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            cart_id: 0,
            product_id: 0,
            quantity: default_quantity(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Cart with its items (for API responses)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartWithItems {
    #[serde(flatten)]
    pub cart: Cart,
    pub items: Vec<CartItem>,
}

fn default_quantity() -> i32 {
    1
}

/// Input for adding a product to a cart
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCartItemInput {
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Input for changing the quantity of a cart item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCartItemInput {
    #[validate(range(min = 1))]
    pub quantity: i32,
}
