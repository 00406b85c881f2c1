//! # userhub-auth
//!
//! Password hashing and signed-token authentication primitives for UserHub.
//!
//! ## Modules
//!
//! - `jwt` — token creation and validation
//! - `password` — Argon2id password hashing and verification

pub mod error;
pub mod jwt;
pub mod password;

pub use error::{HashError, TokenError};
pub use jwt::{Claims, TokenDecoder, TokenEncoder};
pub use password::PasswordHasher;
