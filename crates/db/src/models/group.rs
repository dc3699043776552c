//! Group models and DTOs.

use linkdock_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Group {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub icon: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a group.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroup {
    pub name: String,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a group. Absent fields are left unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGroup {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
}
