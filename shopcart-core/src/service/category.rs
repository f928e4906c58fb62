//! Category business logic

use crate::domain::{Category, CreateCategoryInput, UpdateCategoryInput};
use crate::error::{AppError, Result};
use crate::repository::{is_foreign_key_violation, is_unique_violation, CategoryRepository};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct CategoryService<R: CategoryRepository> {
    repo: Arc<R>,
}

fn duplicate_name(name: &str) -> AppError {
    AppError::Conflict(format!("Category '{}' already exists", name))
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: CreateCategoryInput) -> Result<Category> {
        input.validate()?;

        if self.repo.find_by_name(&input.name).await?.is_some() {
            return Err(duplicate_name(&input.name));
        }

        let category = self.repo.create(&input).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_name(&input.name)
            } else {
                e
            }
        })?;

        info!(category_id = category.id, "category created");
        Ok(category)
    }

    pub async fn get(&self, id: i64) -> Result<Category> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Category>> {
        self.repo.list(offset, limit).await
    }

    pub async fn update(&self, id: i64, input: UpdateCategoryInput) -> Result<Category> {
        input.validate()?;

        let Some(name) = input.name.as_deref() else {
            return self.get(id).await;
        };

        if let Some(existing) = self.repo.find_by_name(name).await? {
            if existing.id != id {
                return Err(duplicate_name(name));
            }
        }

        let (category, written) = self.repo.update(id, &input).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_name(name)
            } else {
                e
            }
        })?;

        if written {
            info!(category_id = id, "category updated");
        }
        Ok(category)
    }

    /// Delete an empty category; existence and emptiness are checked by the write itself
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.delete(id).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::Conflict(format!("Category {} still has products", id))
            } else {
                e
            }
        })?;

        info!(category_id = id, "category deleted");
        Ok(())
    }
}
