//! Identity extractors for Axum handlers.
//!
//! Caller identity travels in session headers set by the front end after
//! login: `X-User-Id` carries the account id, and `X-Is-Admin: true` marks
//! the password-authenticated admin session. The session protocol itself is
//! outside this service's scope; these extractors only read it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use linkdock_core::error::CoreError;
use linkdock_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the caller's account id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header marking an admin session.
pub const IS_ADMIN_HEADER: &str = "x-is-admin";

/// Authenticated user extracted from the session headers.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// Whether the session is an admin session.
    pub is_admin: bool,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing X-User-Id header".into()))
            })?
            .parse::<DbId>()
            .map_err(|_| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid X-User-Id header; expected a numeric id".into(),
                ))
            })?;

        let is_admin = parts
            .headers
            .get(IS_ADMIN_HEADER)
            .and_then(|v| v.to_str().ok())
            == Some("true");

        Ok(AuthUser { user_id, is_admin })
    }
}

/// Requires an admin session. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin session required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
