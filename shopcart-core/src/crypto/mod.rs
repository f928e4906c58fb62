//! Cryptographic utilities for Shopcart Core

pub mod password;

pub use password::{hash_password, verify_password, DUMMY_PASSWORD_HASH};
