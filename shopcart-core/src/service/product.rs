//! Product business logic

use crate::domain::{CreateProductInput, Product, UpdateProductInput};
use crate::error::{AppError, Result};
use crate::repository::{is_foreign_key_violation, CategoryRepository, ProductRepository};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

pub struct ProductService<R: ProductRepository, C: CategoryRepository> {
    repo: Arc<R>,
    category_repo: Arc<C>,
}

fn category_not_found(category_id: i64) -> AppError {
    AppError::NotFound(format!("Category {} not found", category_id))
}

impl<R: ProductRepository, C: CategoryRepository> ProductService<R, C> {
    pub fn new(repo: Arc<R>, category_repo: Arc<C>) -> Self {
        Self {
            repo,
            category_repo,
        }
    }

    async fn ensure_category_exists(&self, category_id: i64) -> Result<()> {
        if self.category_repo.find_by_id(category_id).await?.is_none() {
            warn!(category_id, "product references unknown category");
            return Err(category_not_found(category_id));
        }
        Ok(())
    }

    pub async fn create(&self, input: CreateProductInput) -> Result<Product> {
        input.validate()?;
        self.ensure_category_exists(input.category_id).await?;

        // The category may vanish between the check and the insert
        let product = self.repo.create(&input).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                category_not_found(input.category_id)
            } else {
                e
            }
        })?;

        info!(product_id = product.id, category_id = product.category_id, "product created");
        Ok(product)
    }

    pub async fn get(&self, id: i64) -> Result<Product> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>> {
        self.repo.list(offset, limit).await
    }

    /// Sparse update; the store is touched only for fields that differ
    pub async fn update(&self, id: i64, input: UpdateProductInput) -> Result<Product> {
        input.validate()?;

        // The diff runs against the locked row, an unknown target category
        // surfaces as a foreign key failure on write
        let (product, written) = self.repo.update(id, &input).await.map_err(|e| {
            match input.category_id {
                Some(category_id) if is_foreign_key_violation(&e) => {
                    warn!(product_id = id, category_id, "product moved to unknown category");
                    category_not_found(category_id)
                }
                _ => e,
            }
        })?;

        if written {
            info!(product_id = id, "product updated");
        }
        Ok(product)
    }

    /// Delete a product; cart items that reference it go with it
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.delete(id).await?;
        info!(product_id = id, "product deleted");
        Ok(())
    }
}
