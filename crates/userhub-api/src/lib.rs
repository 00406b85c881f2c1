//! # userhub-api
//!
//! HTTP API layer for UserHub using Axum — routes, middleware, handlers,
//! extractors, and DTOs.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
