//! Handlers for sign-in and admin password management.
//!
//! Google sign-in delegates token validation to the [`GoogleTokenVerifier`]
//! collaborator and creates the account on first login. Admin access is a
//! separate password check against the single stored Argon2id hash.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use linkdock_core::error::CoreError;
use linkdock_db::models::user::UserSession;
use linkdock_db::repositories::{AdminRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, verify_password, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyPasswordRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyPasswordResponse {
    pub valid: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// POST /api/v1/auth/google
///
/// Verify a Google ID token and log the account in, creating it on first
/// sign-in. Public.
pub async fn google_login(
    State(state): State<AppState>,
    Json(input): Json<GoogleLoginRequest>,
) -> AppResult<impl IntoResponse> {
    let profile = state
        .google_verifier
        .verify(&input.id_token)
        .await
        .map_err(|e| AppError::InternalError(format!("Token verification failed: {e}")))?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid Google ID token".into()))
        })?;

    let user = UserRepo::login_or_create_from_google(&state.pool, &profile).await?;

    tracing::info!(user_id = user.id, "User signed in via Google");

    Ok(Json(DataResponse {
        data: UserSession::from_user(&user),
    }))
}

/// POST /api/v1/auth/verify
///
/// Check a password against the stored admin hash. Public; a valid password
/// is what upgrades a session to admin.
pub async fn verify_admin_password(
    State(state): State<AppState>,
    Json(input): Json<VerifyPasswordRequest>,
) -> AppResult<impl IntoResponse> {
    let hash = AdminRepo::get_password_hash(&state.pool)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Admin access is not configured".into(),
            ))
        })?;

    let valid = verify_password(&input.password, &hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;

    if !valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid admin password".into(),
        )));
    }

    Ok(Json(DataResponse {
        data: VerifyPasswordResponse { valid: true },
    }))
}

/// POST /api/v1/auth/change-password
///
/// Rotate the admin password. Requires an admin session and the current
/// password.
pub async fn change_admin_password(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<impl IntoResponse> {
    if input.new_password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "New password must be at least {MIN_PASSWORD_LENGTH} characters"
        ))));
    }

    let hash = AdminRepo::get_password_hash(&state.pool)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Admin access is not configured".into(),
            ))
        })?;

    let current_ok = verify_password(&input.current_password, &hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !current_ok {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    AdminRepo::set_password_hash(&state.pool, &new_hash).await?;

    tracing::info!(user_id = admin.user_id, "Admin password changed");

    Ok(StatusCode::NO_CONTENT)
}
