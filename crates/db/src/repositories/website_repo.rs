//! Repository for the `websites` table.

use linkdock_core::check::LinkItem;
use linkdock_core::types::DbId;
use sqlx::PgPool;

use crate::models::website::{CreateWebsite, UpdateWebsite, Website};

/// Column list for `websites` queries.
const WEBSITE_COLUMNS: &str = "\
    id, user_id, group_id, name, url, logo_url, logo_type, description, \
    username, password, sort_order, click_count, last_clicked_at, created_at, \
    is_public";

/// Provides CRUD operations for bookmarks, plus the bulk operations used by
/// the link checker.
pub struct WebsiteRepo;

impl WebsiteRepo {
    /// List all websites owned by a user, ordered for dashboard display:
    /// by group, most-clicked first within a group, then manual sort order.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Website>, sqlx::Error> {
        let query = format!(
            "SELECT {WEBSITE_COLUMNS} FROM websites \
             WHERE user_id = $1 \
             ORDER BY group_id ASC, click_count DESC, sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Website>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List the caller's links as minimal `LinkItem`s for the batch prober.
    ///
    /// The ordering must be stable across calls within one check run so the
    /// stateless batch index addresses a consistent slice.
    pub async fn list_link_items(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<LinkItem>, sqlx::Error> {
        let rows: Vec<(DbId, String, String)> = sqlx::query_as(
            "SELECT id, name, url FROM websites \
             WHERE user_id = $1 \
             ORDER BY group_id ASC, click_count DESC, sort_order ASC, id ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, url)| LinkItem { id, name, url })
            .collect())
    }

    /// Find a website by id, scoped to its owner.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        website_id: DbId,
    ) -> Result<Option<Website>, sqlx::Error> {
        let query = format!("SELECT {WEBSITE_COLUMNS} FROM websites WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Website>(&query)
            .bind(website_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new website for a user.
    ///
    /// The target group must belong to the same user; the insert is guarded
    /// in SQL so the check cannot race a concurrent group deletion. Returns
    /// `None` when the group does not exist or is owned by someone else.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateWebsite,
    ) -> Result<Option<Website>, sqlx::Error> {
        sqlx::query_as::<_, Website>(&Self::create_query())
            .bind(user_id)
            .bind(input.group_id)
            .bind(&input.name)
            .bind(&input.url)
            .bind(&input.logo_url)
            .bind(input.logo_type.as_deref().unwrap_or("default"))
            .bind(&input.description)
            .bind(&input.username)
            .bind(&input.password)
            .bind(input.sort_order.unwrap_or(0))
            .fetch_optional(pool)
            .await
    }

    fn create_query() -> String {
        format!(
            "INSERT INTO websites \
                (user_id, group_id, name, url, logo_url, logo_type, description, \
                 username, password, sort_order) \
             SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10 \
             WHERE EXISTS (SELECT 1 FROM groups WHERE id = $2 AND user_id = $1) \
             RETURNING {WEBSITE_COLUMNS}"
        )
    }

    /// Update a website owned by the given user. Absent fields keep their
    /// current value. Returns `None` when the website does not exist, is
    /// owned by someone else, or the requested target group is not the
    /// caller's.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        website_id: DbId,
        input: &UpdateWebsite,
    ) -> Result<Option<Website>, sqlx::Error> {
        sqlx::query_as::<_, Website>(&Self::update_query())
            .bind(website_id)
            .bind(user_id)
            .bind(input.group_id)
            .bind(&input.name)
            .bind(&input.url)
            .bind(&input.logo_url)
            .bind(&input.logo_type)
            .bind(&input.description)
            .bind(&input.username)
            .bind(&input.password)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    fn update_query() -> String {
        format!(
            "UPDATE websites SET \
                group_id = COALESCE($3, group_id), \
                name = COALESCE($4, name), \
                url = COALESCE($5, url), \
                logo_url = COALESCE($6, logo_url), \
                logo_type = COALESCE($7, logo_type), \
                description = COALESCE($8, description), \
                username = COALESCE($9, username), \
                password = COALESCE($10, password), \
                sort_order = COALESCE($11, sort_order) \
             WHERE id = $1 AND user_id = $2 \
               AND ($3 IS NULL OR \
                    EXISTS (SELECT 1 FROM groups WHERE id = $3 AND user_id = $2)) \
             RETURNING {WEBSITE_COLUMNS}"
        )
    }

    /// Delete a website owned by the given user. Returns whether a row was
    /// removed.
    pub async fn delete(
        pool: &PgPool,
        user_id: DbId,
        website_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM websites WHERE id = $1 AND user_id = $2")
            .bind(website_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a click-through: bump the counter and stamp the click time.
    pub async fn record_click(
        pool: &PgPool,
        user_id: DbId,
        website_id: DbId,
    ) -> Result<Option<Website>, sqlx::Error> {
        let query = format!(
            "UPDATE websites SET \
                click_count = click_count + 1, \
                last_clicked_at = now() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {WEBSITE_COLUMNS}"
        );
        sqlx::query_as::<_, Website>(&query)
            .bind(website_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a set of websites owned by the caller in one statement.
    ///
    /// Ids that do not exist or belong to another user are silently skipped;
    /// the returned count is the number of rows actually removed.
    pub async fn bulk_delete(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM websites WHERE user_id = $1 AND id = ANY($2)")
            .bind(user_id)
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The suite runs without a live database, so the ownership guards are
    // pinned at the statement level.

    #[test]
    fn insert_only_lands_in_the_callers_own_group() {
        let query = WebsiteRepo::create_query();
        assert!(
            query.contains("EXISTS (SELECT 1 FROM groups WHERE id = $2 AND user_id = $1)"),
            "{query}"
        );
    }

    #[test]
    fn group_moves_are_limited_to_the_callers_own_groups() {
        let query = WebsiteRepo::update_query();
        assert!(query.contains("id = $1 AND user_id = $2"), "{query}");
        assert!(
            query.contains("EXISTS (SELECT 1 FROM groups WHERE id = $3 AND user_id = $2)"),
            "{query}"
        );
    }
}
