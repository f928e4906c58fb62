//! HTTP middleware for Shopcart Core
//!
//! - Session authentication (`AuthUser` extractor)
//! - Request observability (request id propagation and metrics)
//! - Log-safe request spans

pub mod auth;
pub mod metrics;
pub mod trace;

pub use auth::{resolve_caller, AuthUser, SESSION_COOKIE};
pub use metrics::ObservabilityLayer;
pub use trace::SanitizedMakeSpan;
