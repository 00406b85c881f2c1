//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::SqlitePool;

use userhub_auth::jwt::decoder::TokenDecoder;
use userhub_auth::jwt::encoder::TokenEncoder;
use userhub_auth::password::hasher::PasswordHasher;
use userhub_core::config::AppConfig;
use userhub_database::repositories::user::UserRepository;
use userhub_service::auth::service::AuthService;
use userhub_service::user::service::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// SQLite connection pool
    pub db_pool: SqlitePool,

    // ── Auth ─────────────────────────────────────────────────
    /// Token encoder
    pub token_encoder: Arc<TokenEncoder>,
    /// Token decoder and validator
    pub token_decoder: Arc<TokenDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Signup and login service
    pub auth_service: Arc<AuthService>,
    /// User query and maintenance service
    pub user_service: Arc<UserService>,
}
