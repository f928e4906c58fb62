//! Shopcart Core - Commerce Service Backend
//!
//! Accounts with session-token authentication, a product catalog and
//! per-user shopping carts, served over a JSON REST API backed by MySQL.

pub mod api;
pub mod config;
pub mod crypto;
pub mod domain;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod migration;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
