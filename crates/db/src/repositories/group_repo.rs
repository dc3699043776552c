//! Repository for the `groups` table.

use linkdock_core::types::DbId;
use sqlx::PgPool;

use crate::models::group::Group;

/// Column list for `groups` queries.
const GROUP_COLUMNS: &str = "id, user_id, name, icon, sort_order, created_at";

/// Default icon assigned when the caller does not provide one.
const DEFAULT_ICON: &str = "📁";

/// Provides CRUD operations for bookmark groups.
pub struct GroupRepo;

impl GroupRepo {
    /// List all groups owned by a user, ordered for display.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Group>, sqlx::Error> {
        let query = format!(
            "SELECT {GROUP_COLUMNS} FROM groups \
             WHERE user_id = $1 \
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Create a group for a user.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
        icon: Option<&str>,
        sort_order: i32,
    ) -> Result<Group, sqlx::Error> {
        let query = format!(
            "INSERT INTO groups (user_id, name, icon, sort_order) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {GROUP_COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(user_id)
            .bind(name)
            .bind(icon.unwrap_or(DEFAULT_ICON))
            .bind(sort_order)
            .fetch_one(pool)
            .await
    }

    /// Update a group owned by the given user. Absent fields keep their
    /// current value. Returns `None` when the group does not exist or is
    /// owned by someone else.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        group_id: DbId,
        name: Option<&str>,
        icon: Option<&str>,
        sort_order: Option<i32>,
    ) -> Result<Option<Group>, sqlx::Error> {
        let query = format!(
            "UPDATE groups SET \
                name = COALESCE($3, name), \
                icon = COALESCE($4, icon), \
                sort_order = COALESCE($5, sort_order) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {GROUP_COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(group_id)
            .bind(user_id)
            .bind(name)
            .bind(icon)
            .bind(sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a group owned by the given user (cascades to its websites).
    /// Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, group_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1 AND user_id = $2")
            .bind(group_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every group the user owns (used by replace-mode import;
    /// websites go with them via cascade).
    pub async fn delete_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM groups WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
