//! Error types for password hashing and token validation.
//!
//! Both enums stay precise inside this crate and convert into
//! `userhub_core::error::AppError` at the application boundary. Token
//! failures all collapse into the same generic authentication error there,
//! so a caller probing the HTTP surface cannot tell a bad signature from
//! an expired or garbled token.

use thiserror::Error;

use userhub_core::error::AppError;

/// Errors produced while hashing or verifying passwords.
///
/// A mismatched password is not an error; verification reports it as
/// `Ok(false)`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashError {
    /// The stored hash is not a valid PHC string.
    #[error("stored password hash is malformed")]
    MalformedHash,
    /// The hashing backend failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Errors produced while decoding or validating a token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token is not structurally valid or its claims cannot be read.
    #[error("token is malformed")]
    Malformed,
    /// The signature does not verify against the server secret.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// The token is past its expiry.
    #[error("token has expired")]
    Expired,
}

impl From<HashError> for AppError {
    fn from(err: HashError) -> Self {
        AppError::internal(format!("Password hash error: {err}"))
    }
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::authentication("Could not validate credentials")
    }
}
