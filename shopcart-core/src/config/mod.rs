//! Configuration management for Shopcart Core

use anyhow::{bail, Context, Result};
use std::env;

/// Minimum accepted length of the token signing secret, in bytes
const MIN_JWT_SECRET_LEN: usize = 32;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Session token configuration
    pub jwt: JwtConfig,
    /// Whether the session cookie carries the `Secure` attribute
    pub cookie_secure: bool,
    /// Logging and metrics configuration
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub access_token_ttl_secs: i64,
}

// The signing secret must never end up in logs
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "text" or "json"
    pub log_format: String,
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
            metrics_enabled: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config = Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()
                    .unwrap_or(2),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").context("JWT_SECRET is required")?,
                issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "shopcart".to_string()),
                access_token_ttl_secs: env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse::<i64>()
                    .context("Invalid ACCESS_TOKEN_EXPIRE_MINUTES")?
                    * 60,
            },
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            telemetry: TelemetryConfig {
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
                metrics_enabled: env::var("METRICS_ENABLED")
                    .map(|s| s.to_lowercase() == "true")
                    .unwrap_or(false),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the service insecure or unusable
    pub fn validate(&self) -> Result<()> {
        if self.jwt.secret.len() < MIN_JWT_SECRET_LEN {
            bail!("JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} bytes");
        }
        if self.jwt.access_token_ttl_secs <= 0 {
            bail!("ACCESS_TOKEN_EXPIRE_MINUTES must be positive");
        }
        Ok(())
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
