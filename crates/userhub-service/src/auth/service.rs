//! Signup and login orchestration.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use userhub_auth::jwt::encoder::TokenEncoder;
use userhub_auth::password::hasher::PasswordHasher;
use userhub_core::error::AppError;
use userhub_database::repositories::user::UserRepository;
use userhub_entity::user::model::NewUser;
use userhub_entity::user::User;

/// Login failure, kept precise below the HTTP boundary.
///
/// The two credential variants stay distinguishable here so callers and
/// logs can tell an unknown username from a bad password; the HTTP layer
/// collapses both into one generic response.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user exists with the given username.
    #[error("unknown username")]
    WrongUsername,
    /// The user exists but the password does not match.
    #[error("wrong password")]
    WrongPassword,
    /// A failure unrelated to the supplied credentials.
    #[error(transparent)]
    Other(#[from] AppError),
}

/// Data required to register a new account.
#[derive(Debug, Clone)]
pub struct SignupData {
    /// Desired username.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Plaintext password, hashed before it reaches the repository.
    pub password: String,
}

/// Handles signup and login.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token encoder.
    token_encoder: Arc<TokenEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        token_encoder: Arc<TokenEncoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            token_encoder,
        }
    }

    /// Registers a new user.
    ///
    /// The plaintext password is hashed here; the repository only ever sees
    /// the hash. Duplicate usernames or emails propagate as conflicts.
    pub async fn signup(&self, data: SignupData) -> Result<User, AppError> {
        let password_hash = self.hasher.hash_password(&data.password)?;

        let user = self
            .user_repo
            .create(&NewUser {
                username: data.username,
                email: data.email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    ///
    /// Login does not gate on `is_active`; only guarded routes enforce it.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AuthError::WrongUsername)?;

        let valid = self
            .hasher
            .verify_password(password, &user.password_hash)
            .map_err(|e| AuthError::Other(e.into()))?;
        if !valid {
            return Err(AuthError::WrongPassword);
        }

        let token = self.token_encoder.issue(user.id)?;

        info!(user_id = user.id, "User authenticated");

        Ok(token)
    }
}
