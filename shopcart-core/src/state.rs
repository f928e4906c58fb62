//! Application state traits for dependency injection
//!
//! Handlers are generic over [`HasServices`] so the same router runs
//! against the MySQL-backed `AppState` and against in-memory test state.

use crate::config::Config;
use crate::jwt::JwtManager;
use crate::repository::{CartRepository, CategoryRepository, ProductRepository, UserRepository};
use crate::service::{AuthService, CartService, CategoryService, ProductService, UserService};

/// Access to configuration and every domain service
pub trait HasServices: Clone + Send + Sync + 'static {
    type UserRepo: UserRepository;
    type CategoryRepo: CategoryRepository;
    type ProductRepo: ProductRepository;
    type CartRepo: CartRepository;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the JWT manager
    fn jwt_manager(&self) -> &JwtManager;

    fn auth_service(&self) -> &AuthService<Self::UserRepo>;

    fn user_service(&self) -> &UserService<Self::UserRepo>;

    fn category_service(&self) -> &CategoryService<Self::CategoryRepo>;

    fn product_service(&self) -> &ProductService<Self::ProductRepo, Self::CategoryRepo>;

    fn cart_service(&self) -> &CartService<Self::CartRepo>;

    /// Check if the backing store answers
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
