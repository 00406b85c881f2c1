//! JWT token encoding, decoding, and claims management.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::TokenDecoder;
pub use encoder::TokenEncoder;

use jsonwebtoken::Algorithm;

use userhub_core::error::AppError;

/// Resolve a configured algorithm name into a signing algorithm.
///
/// Only HMAC variants are accepted; the signing key is a shared secret.
pub(crate) fn resolve_algorithm(name: &str) -> Result<Algorithm, AppError> {
    match name {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(AppError::configuration(format!(
            "Unsupported signing algorithm '{other}' (expected HS256, HS384, or HS512)"
        ))),
    }
}
