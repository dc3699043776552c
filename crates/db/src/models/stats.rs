//! Aggregate statistics payloads.

use linkdock_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Per-user dashboard statistics (`GET /api/v1/stats`).
#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    pub total_links: i64,
    pub total_clicks: i64,
    /// Websites clicked within the trailing 7 days.
    pub weekly_clicks: i64,
    pub new_links_this_week: i64,
}

/// Platform-wide statistics (`GET /api/v1/admin/stats`).
#[derive(Debug, Clone, Serialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub total_links: i64,
    pub total_groups: i64,
    pub total_clicks: i64,
    pub new_users_this_week: i64,
    pub new_links_this_week: i64,
}

/// One row of the admin user listing: account plus usage counters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserWithStats {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub created_at: Timestamp,
    pub last_login: Option<Timestamp>,
    pub link_count: i64,
    pub group_count: i64,
    pub total_clicks: i64,
}
