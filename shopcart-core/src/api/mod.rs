//! REST API handlers and shared request/response types

pub mod auth;
pub mod cart;
pub mod cart_item;
pub mod category;
pub mod health;
pub mod metrics;
pub mod product;
pub mod user;

use serde::{Deserialize, Serialize};

/// Largest page a list endpoint returns
pub(crate) const MAX_LIMIT: i64 = 50;

/// Pagination query parameters (`?skip=&limit=`)
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PaginationQuery {
    #[serde(default, deserialize_with = "deserialize_skip")]
    pub skip: i64,
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    pub limit: i64,
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

pub(crate) fn default_limit() -> i64 {
    10
}

/// Reject negative skip values
pub(crate) fn deserialize_skip<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    if value < 0 {
        return Err(serde::de::Error::custom("skip must be >= 0"));
    }
    Ok(value)
}

/// Reject limit values outside 1..=MAX_LIMIT
pub(crate) fn deserialize_limit<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    if !(1..=MAX_LIMIT).contains(&value) {
        return Err(serde::de::Error::custom(format!(
            "limit must be between 1 and {MAX_LIMIT}"
        )));
    }
    Ok(value)
}

/// Message response (for delete, auth actions, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
