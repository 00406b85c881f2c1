//! User lookup and maintenance.

pub mod service;

pub use service::UserService;
