//! # userhub-service
//!
//! Business logic service layer for UserHub. Each service orchestrates
//! repositories and authentication components to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod user;

pub use auth::{AuthError, AuthService};
pub use user::UserService;
