//! Data access layer (Repository pattern)

pub mod cart;
pub mod category;
pub mod product;
pub mod user;

pub use cart::CartRepository;
pub use category::CategoryRepository;
pub use product::ProductRepository;
pub use user::UserRepository;

use crate::error::AppError;
use sqlx::error::ErrorKind;

fn database_error_kind(err: &AppError) -> Option<ErrorKind> {
    match err {
        AppError::Database(sqlx::Error::Database(db_err)) => Some(db_err.kind()),
        _ => None,
    }
}

/// Whether a store error is a duplicate-key violation (MySQL 1062)
pub fn is_unique_violation(err: &AppError) -> bool {
    matches!(database_error_kind(err), Some(ErrorKind::UniqueViolation))
}

/// Whether a store error is a foreign-key violation (MySQL 1451 / 1452)
pub fn is_foreign_key_violation(err: &AppError) -> bool {
    matches!(database_error_kind(err), Some(ErrorKind::ForeignKeyViolation))
}
