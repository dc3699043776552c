//! Handlers for bookmark groups and dataset import/export.
//!
//! All endpoints are scoped to the authenticated caller; a group id
//! belonging to another user behaves exactly like a missing id.

use std::collections::{HashMap, HashSet};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use linkdock_core::error::CoreError;
use linkdock_core::types::DbId;
use linkdock_db::models::export::{
    ExportData, ExportDocument, ImportMode, ImportRequest, ImportSummary, EXPORT_VERSION,
};
use linkdock_db::models::group::{CreateGroup, UpdateGroup};
use linkdock_db::models::website::CreateWebsite;
use linkdock_db::repositories::{GroupRepo, WebsiteRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/groups
pub async fn list(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let groups = GroupRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data: groups }))
}

/// POST /api/v1/groups
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateGroup>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Group name must not be empty".into(),
        )));
    }

    let group = GroupRepo::create(
        &state.pool,
        auth.user_id,
        input.name.trim(),
        input.icon.as_deref(),
        input.sort_order.unwrap_or(0),
    )
    .await?;

    tracing::info!(group_id = group.id, user_id = auth.user_id, "Group created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: group })))
}

/// PUT /api/v1/groups/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(group_id): Path<DbId>,
    Json(input): Json<UpdateGroup>,
) -> AppResult<impl IntoResponse> {
    let group = GroupRepo::update(
        &state.pool,
        auth.user_id,
        group_id,
        input.name.as_deref(),
        input.icon.as_deref(),
        input.sort_order,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Group",
        id: group_id,
    }))?;

    Ok(Json(DataResponse { data: group }))
}

/// DELETE /api/v1/groups/{id}
///
/// Websites in the group are removed by the cascade.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(group_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = GroupRepo::delete(&state.pool, auth.user_id, group_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Group",
            id: group_id,
        }));
    }

    tracing::info!(group_id, user_id = auth.user_id, "Group deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/groups/export
///
/// Full dataset export for the caller. Returned as a bare document (no
/// response envelope) so the payload can be saved to a file as-is.
pub async fn export_data(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let groups = GroupRepo::list_for_user(&state.pool, auth.user_id).await?;
    let websites = WebsiteRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(ExportDocument {
        version: EXPORT_VERSION,
        exported_at: Utc::now(),
        data: ExportData { groups, websites },
    }))
}

/// POST /api/v1/groups/import
///
/// Import a previously exported dataset.
///
/// `merge` keeps existing data: groups are matched by name, and a website
/// whose URL already exists in its target group is skipped. `replace` drops
/// the caller's groups (and, by cascade, websites) first.
pub async fn import_data(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ImportRequest>,
) -> AppResult<impl IntoResponse> {
    if matches!(input.mode, ImportMode::Replace) {
        let removed = GroupRepo::delete_all_for_user(&state.pool, auth.user_id).await?;
        tracing::info!(
            user_id = auth.user_id,
            removed,
            "Existing groups cleared for replace import"
        );
    }

    let existing_groups = GroupRepo::list_for_user(&state.pool, auth.user_id).await?;
    let mut group_id_by_name: HashMap<String, DbId> = existing_groups
        .into_iter()
        .map(|g| (g.name, g.id))
        .collect();

    // Maps the exported group ids onto the ids they land under here.
    let mut group_id_map: HashMap<DbId, DbId> = HashMap::new();
    let mut groups_imported = 0;

    for group in &input.data.groups {
        let target_id = match group_id_by_name.get(&group.name) {
            Some(&id) => id,
            None => {
                let created = GroupRepo::create(
                    &state.pool,
                    auth.user_id,
                    &group.name,
                    group.icon.as_deref(),
                    group.sort_order,
                )
                .await?;
                group_id_by_name.insert(group.name.clone(), created.id);
                groups_imported += 1;
                created.id
            }
        };
        if let Some(exported_id) = group.id {
            group_id_map.insert(exported_id, target_id);
        }
    }

    let existing_urls: HashSet<(DbId, String)> =
        WebsiteRepo::list_for_user(&state.pool, auth.user_id)
            .await?
            .into_iter()
            .map(|w| (w.group_id, w.url))
            .collect();

    let mut websites_imported = 0;
    let mut websites_skipped = 0;

    for website in &input.data.websites {
        // A website referencing a group the export did not carry has nowhere
        // to land.
        let Some(&group_id) = group_id_map.get(&website.group_id) else {
            websites_skipped += 1;
            continue;
        };
        if existing_urls.contains(&(group_id, website.url.clone())) {
            websites_skipped += 1;
            continue;
        }

        let created = WebsiteRepo::create(
            &state.pool,
            auth.user_id,
            &CreateWebsite {
                group_id,
                name: website.name.clone(),
                url: website.url.clone(),
                logo_url: website.logo_url.clone(),
                logo_type: website.logo_type.clone(),
                description: website.description.clone(),
                username: None,
                password: None,
                sort_order: Some(website.sort_order),
            },
        )
        .await?;
        // The target group was created or matched above; None means it
        // vanished mid-import, which counts as a skip, not a failure.
        match created {
            Some(_) => websites_imported += 1,
            None => websites_skipped += 1,
        }
    }

    tracing::info!(
        user_id = auth.user_id,
        groups_imported,
        websites_imported,
        websites_skipped,
        "Dataset import finished"
    );

    Ok(Json(DataResponse {
        data: ImportSummary {
            groups_imported,
            websites_imported,
            websites_skipped,
        },
    }))
}
