//! Session token handling
//!
//! Session state is carried entirely by a signed JWT. The server keeps no
//! session table: a token is valid if and only if its signature, issuer,
//! audience, type and expiry all check out.

use crate::config::JwtConfig;
use crate::error::{AppError, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Audience claim of every session token
const SESSION_AUDIENCE: &str = "shopcart";

/// Token type discriminator of session tokens
const SESSION_TOKEN_TYPE: &str = "session";

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Token type discriminator (prevents token confusion attacks)
    #[serde(default)]
    pub token_type: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// JWT token manager
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        // Expiry is enforced exactly, see verify_session_token
        v.leeway = 0;
        v.set_audience(&[SESSION_AUDIENCE]);
        v.set_issuer(&[&self.config.issuer]);
        v
    }

    /// Issue a session token for a user, valid for the configured TTL
    pub fn issue_session_token(&self, user_id: i64) -> Result<String> {
        let expires_at = Utc::now() + Duration::seconds(self.config.access_token_ttl_secs);
        self.issue_session_token_with_expiry(user_id, expires_at)
    }

    /// Issue a session token with an explicit absolute expiry
    pub fn issue_session_token_with_expiry(
        &self,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<String> {
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iss: self.config.issuer.clone(),
            aud: SESSION_AUDIENCE.to_string(),
            token_type: SESSION_TOKEN_TYPE.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        };
        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.encoding_key).map_err(|e| AppError::Internal(e.into()))
    }

    /// Verify a session token and return the user id it was issued for.
    ///
    /// Fails closed: every decode, signature, claim or expiry problem yields
    /// the same `Unauthorized` error so callers cannot tell which check failed.
    pub fn verify_session_token(&self, token: &str) -> Result<i64> {
        let invalid = || AppError::Unauthorized("Invalid or expired token".to_string());

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| {
                tracing::debug!(error = %e, "session token rejected");
                invalid()
            })?
            .claims;

        if claims.token_type != SESSION_TOKEN_TYPE {
            return Err(invalid());
        }
        // Invalid at or after exp, jsonwebtoken alone still accepts exp == now
        if claims.exp <= Utc::now().timestamp() {
            return Err(invalid());
        }

        claims.sub.parse::<i64>().map_err(|_| invalid())
    }

    /// Get token expiration TTL in seconds
    pub fn access_token_ttl(&self) -> i64 {
        self.config.access_token_ttl_secs
    }
}
