//! JWT token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};

use userhub_core::config::auth::AuthConfig;
use userhub_core::error::AppError;

use crate::error::TokenError;

use super::claims::Claims;

/// Validates signed JWT access tokens.
#[derive(Clone)]
pub struct TokenDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenDecoder {
    /// Creates a new decoder from auth configuration.
    ///
    /// Fails if the configured algorithm is not an HMAC variant.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let algorithm = super::resolve_algorithm(&config.algorithm)?;

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    /// Decodes and validates a token string.
    ///
    /// The signature is verified before any claim is inspected, so a
    /// tampered token is rejected without leaking whether its claims were
    /// otherwise acceptable.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature
                    | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                        TokenError::InvalidSignature
                    }
                    _ => TokenError::Malformed,
                }
            })?;

        Ok(token_data.claims)
    }
}
