//! # userhub-entity
//!
//! Domain entity models for UserHub.

pub mod user;

pub use user::User;
