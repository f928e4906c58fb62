//! Product domain model

use super::common::{deserialize_some, validate_not_blank};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Product {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: String::new(),
            description: None,
            price: Decimal::ZERO,
            category_id: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Largest value a `DECIMAL(10,2)` column holds
fn max_price() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

fn validate_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(validator::ValidationError::new("negative_price"));
    }
    // Trailing zeros are fine ("1.500"), extra precision is not.
    if price.normalize().scale() > 2 {
        return Err(validator::ValidationError::new("price_precision"));
    }
    if *price > max_price() {
        return Err(validator::ValidationError::new("price_too_large"));
    }
    Ok(())
}

/// Input for creating a product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    pub category_id: i64,
}

/// Sparse product update; only present fields change.
///
/// `description` distinguishes "omitted" (`None`) from "cleared" (`Some(None)`).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductInput {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    pub category_id: Option<i64>,
}

/// Fields of a product row that actually change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub category_id: Option<i64>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category_id.is_none()
    }
}

impl Product {
    /// Keep only the fields of `input` that differ from this product
    pub fn diff(&self, input: &UpdateProductInput) -> ProductChanges {
        ProductChanges {
            name: input.name.clone().filter(|n| *n != self.name),
            description: input
                .description
                .clone()
                .filter(|d| *d != self.description),
            price: input.price.filter(|p| *p != self.price),
            category_id: input.category_id.filter(|c| *c != self.category_id),
        }
    }

    /// Overlay a change set on this product
    pub fn apply(&mut self, changes: &ProductChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(category_id) = changes.category_id {
            self.category_id = category_id;
        }
    }
}
