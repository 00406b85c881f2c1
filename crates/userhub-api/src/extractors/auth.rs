//! Bearer-token extractors — resolve the Authorization header into a user.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::debug;

use userhub_core::error::AppError;
use userhub_entity::user::User;

use crate::state::AppState;

/// Message returned for every failed token resolution.
///
/// All failure causes share one message so the response does not reveal
/// whether the token was missing, tampered, expired, or orphaned. The
/// precise cause is logged instead.
const INVALID_CREDENTIALS: &str = "Could not validate credentials";

/// The user resolved from the request's bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// The resolved user, additionally required to be active.
#[derive(Debug, Clone)]
pub struct ActiveUser(pub User);

impl std::ops::Deref for CurrentUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::Deref for ActiveUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract Bearer token from Authorization header
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                AppError::authentication(INVALID_CREDENTIALS)
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            debug!("Authorization header is not a Bearer token");
            AppError::authentication(INVALID_CREDENTIALS)
        })?;

        // Decode and validate the token
        let claims = state.token_decoder.decode(token).map_err(|e| {
            debug!(error = %e, "Token validation failed");
            AppError::from(e)
        })?;

        let user_id = claims.subject_id().map_err(|e| {
            debug!(error = %e, "Token subject is not a user id");
            AppError::from(e)
        })?;

        // Resolve the subject to a stored user
        let user = state.user_repo.find_by_id(user_id).await?.ok_or_else(|| {
            debug!(user_id, "Token subject does not resolve to a user");
            AppError::authentication(INVALID_CREDENTIALS)
        })?;

        Ok(CurrentUser(user))
    }
}

impl FromRequestParts<AppState> for ActiveUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if !user.is_active {
            debug!(user_id = user.id, "Inactive user rejected");
            return Err(AppError::authorization("Inactive user"));
        }

        Ok(ActiveUser(user))
    }
}
