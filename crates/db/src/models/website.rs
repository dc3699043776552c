//! Website (bookmark) models and DTOs.

use linkdock_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `websites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Website {
    pub id: DbId,
    pub user_id: DbId,
    pub group_id: DbId,
    pub name: String,
    pub url: String,
    pub logo_url: Option<String>,
    pub logo_type: String,
    pub description: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub sort_order: i32,
    pub click_count: i32,
    pub last_clicked_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub is_public: bool,
}

/// DTO for creating a website.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWebsite {
    pub group_id: DbId,
    pub name: String,
    pub url: String,
    pub logo_url: Option<String>,
    pub logo_type: Option<String>,
    pub description: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a website. Absent fields are left unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWebsite {
    pub group_id: Option<DbId>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub logo_url: Option<String>,
    pub logo_type: Option<String>,
    pub description: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub sort_order: Option<i32>,
}
