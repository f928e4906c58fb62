//! Domain models for Shopcart Core

pub mod cart;
pub mod category;
pub mod common;
pub mod product;
pub mod user;

pub use cart::*;
pub use category::*;
pub use common::*;
pub use product::*;
pub use user::*;
