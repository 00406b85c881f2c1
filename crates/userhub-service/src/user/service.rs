//! User listing, lookup, partial update, and deletion.

use std::sync::Arc;

use tracing::info;

use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_database::repositories::user::UserRepository;
use userhub_entity::user::model::UserPatch;
use userhub_entity::user::User;

/// Handles user queries and maintenance.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Lists all users.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.user_repo.list().await
    }

    /// Gets a user by ID.
    pub async fn get_user_by_id(&self, id: i64) -> AppResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with id {id} not found")))
    }

    /// Gets a user by username.
    pub async fn get_user_by_username(&self, username: &str) -> AppResult<User> {
        self.user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with username {username} not found")))
    }

    /// Gets a user by email.
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with email {email} not found")))
    }

    /// Applies a partial update to a user.
    ///
    /// Each patch field is applied explicitly; absent fields leave the
    /// stored value untouched.
    pub async fn update_user(&self, id: i64, patch: UserPatch) -> AppResult<User> {
        let mut user = self.get_user_by_id(id).await?;

        if let Some(username) = patch.username {
            user.username = username;
        }
        if let Some(email) = patch.email {
            user.email = Some(email);
        }

        let user = self.user_repo.update(&user).await?;

        info!(user_id = id, "User updated");

        Ok(user)
    }

    /// Deletes a user by ID.
    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        if !self.user_repo.delete(id).await? {
            return Err(AppError::not_found(format!("User with id {id} not found")));
        }

        info!(user_id = id, "User deleted");

        Ok(())
    }
}
