//! Auth handlers — signup and login.

use axum::Json;
use axum::extract::{Form, State};
use tracing::debug;
use validator::Validate;

use userhub_core::error::AppError;
use userhub_service::auth::{AuthError, SignupData};

use crate::dto::request::{LoginForm, SignupRequest};
use crate::dto::response::{TokenResponse, UserResponse};
use crate::state::AppState;

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<UserResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .auth_service
        .signup(SignupData {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// POST /auth/login
///
/// Accepts form-encoded credentials and returns a bearer token. Unknown
/// usernames and wrong passwords produce the same response.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state
        .auth_service
        .authenticate(&form.username, &form.password)
        .await
        .map_err(|e| match e {
            AuthError::WrongUsername | AuthError::WrongPassword => {
                debug!(username = %form.username, cause = %e, "Login rejected");
                AppError::authentication("Incorrect username or password")
            }
            AuthError::Other(err) => err,
        })?;

    Ok(Json(TokenResponse::bearer(token)))
}
