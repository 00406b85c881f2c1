//! JWT token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use userhub_core::config::auth::AuthConfig;
use userhub_core::error::AppError;

use super::claims::Claims;

/// Creates signed JWT access tokens.
#[derive(Clone)]
pub struct TokenEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Header naming the configured algorithm.
    header: Header,
    /// Default token TTL.
    ttl: chrono::Duration,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder")
            .field("header", &self.header)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// Fails if the configured algorithm is not an HMAC variant.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let algorithm = super::resolve_algorithm(&config.algorithm)?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            header: Header::new(algorithm),
            ttl: chrono::Duration::minutes(config.token_ttl_minutes as i64),
        })
    }

    /// Issues a token asserting `subject` with the configured TTL.
    pub fn issue(&self, subject: i64) -> Result<String, AppError> {
        self.issue_with_ttl(subject, self.ttl)
    }

    /// Issues a token asserting `subject` valid for the given duration.
    pub fn issue_with_ttl(&self, subject: i64, ttl: chrono::Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
