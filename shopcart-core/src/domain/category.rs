//! Category domain model

use super::common::validate_not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Category {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a category
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryInput {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
}

/// Input for updating a category
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategoryInput {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
}

impl Category {
    /// The new name if the input renames this category, `None` otherwise
    pub fn renamed_to<'a>(&self, input: &'a UpdateCategoryInput) -> Option<&'a str> {
        input
            .name
            .as_deref()
            .filter(|name| *name != self.name.as_str())
    }
}
