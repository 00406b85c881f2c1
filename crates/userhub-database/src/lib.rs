//! # userhub-database
//!
//! SQLite database connection management and concrete repository
//! implementations for UserHub entities.

pub mod connection;
pub mod migration;
pub mod repositories;
