//! Registration and credential verification.

pub mod service;

pub use service::{AuthError, AuthService, SignupData};
