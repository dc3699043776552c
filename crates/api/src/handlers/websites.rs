//! Handlers for bookmark CRUD, click tracking and page metadata extraction.
//!
//! All endpoints are scoped to the authenticated caller.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use linkdock_core::error::CoreError;
use linkdock_core::types::DbId;
use linkdock_db::models::website::{CreateWebsite, UpdateWebsite};
use linkdock_db::repositories::WebsiteRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/websites
pub async fn list(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let websites = WebsiteRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data: websites }))
}

/// POST /api/v1/websites
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWebsite>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Website name must not be empty".into(),
        )));
    }
    if input.url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Website URL must not be empty".into(),
        )));
    }

    // A group id the caller does not own behaves like a missing group.
    let website = WebsiteRepo::create(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Group",
            id: input.group_id,
        }))?;

    tracing::info!(
        website_id = website.id,
        user_id = auth.user_id,
        "Website created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: website })))
}

/// GET /api/v1/websites/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(website_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let website = WebsiteRepo::find_for_user(&state.pool, auth.user_id, website_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Website",
            id: website_id,
        }))?;

    Ok(Json(DataResponse { data: website }))
}

/// PUT /api/v1/websites/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(website_id): Path<DbId>,
    Json(input): Json<UpdateWebsite>,
) -> AppResult<impl IntoResponse> {
    let website = WebsiteRepo::update(&state.pool, auth.user_id, website_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Website",
            id: website_id,
        }))?;

    Ok(Json(DataResponse { data: website }))
}

/// DELETE /api/v1/websites/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(website_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = WebsiteRepo::delete(&state.pool, auth.user_id, website_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Website",
            id: website_id,
        }));
    }

    tracing::info!(website_id, user_id = auth.user_id, "Website deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/websites/{id}/click
///
/// Record a click-through and return the updated row.
pub async fn record_click(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(website_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let website = WebsiteRepo::record_click(&state.pool, auth.user_id, website_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Website",
            id: website_id,
        }))?;

    Ok(Json(DataResponse { data: website }))
}

// ---------------------------------------------------------------------------
// Page metadata extraction
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

/// Metadata suggested for a new bookmark: raw page extraction merged with
/// the summarizer's cleanup when one is configured.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub logo_url: Option<String>,
    /// The normalized URL that was actually analyzed.
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct LogoResponse {
    pub logo_url: Option<String>,
}

/// POST /api/v1/websites/analyze
pub async fn analyze(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<AnalyzeRequest>,
) -> AppResult<impl IntoResponse> {
    if input.url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "URL must not be empty".into(),
        )));
    }

    let metadata = state.analyzer.analyze(input.url.trim()).await;

    let summary = state
        .summarizer
        .summarize(&metadata.url, &metadata.title, &metadata.description)
        .await
        .unwrap_or_default();

    Ok(Json(DataResponse {
        data: AnalyzeResponse {
            name: summary.name.unwrap_or_else(|| metadata.title.clone()),
            description: summary
                .summary
                .unwrap_or_else(|| metadata.description.clone()),
            category: summary.category,
            logo_url: metadata.logo_url,
            url: metadata.url,
        },
    }))
}

/// POST /api/v1/websites/fetch-logo
pub async fn fetch_logo(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<AnalyzeRequest>,
) -> AppResult<impl IntoResponse> {
    if input.url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "URL must not be empty".into(),
        )));
    }

    let logo_url = state.analyzer.fetch_logo(input.url.trim()).await;

    Ok(Json(DataResponse {
        data: LogoResponse { logo_url },
    }))
}
