//! Business logic layer

pub mod auth;
pub mod cart;
pub mod category;
pub mod product;
pub mod user;

pub use auth::AuthService;
pub use cart::CartService;
pub use category::CategoryService;
pub use product::ProductService;
pub use user::UserService;
