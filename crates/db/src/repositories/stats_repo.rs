//! Aggregate statistics queries for the dashboard and the admin console.

use linkdock_core::types::DbId;
use sqlx::PgPool;

use crate::models::stats::{AdminStats, UserStats, UserWithStats};

/// Read-only aggregate queries over users, groups and websites.
pub struct StatsRepo;

impl StatsRepo {
    /// Per-user dashboard statistics.
    ///
    /// `weekly_clicks` counts websites whose `last_clicked_at` falls within
    /// the trailing 7 days; per-click history is not stored, so this is the
    /// closest available click-recency signal.
    pub async fn user_stats(pool: &PgPool, user_id: DbId) -> Result<UserStats, sqlx::Error> {
        let (total_links, total_clicks, weekly_clicks, new_links_this_week): (i64, i64, i64, i64) =
            sqlx::query_as(
                "SELECT \
                    COUNT(*), \
                    COALESCE(SUM(click_count), 0)::BIGINT, \
                    COUNT(*) FILTER (WHERE last_clicked_at >= now() - INTERVAL '7 days'), \
                    COUNT(*) FILTER (WHERE created_at >= now() - INTERVAL '7 days') \
                 FROM websites WHERE user_id = $1",
            )
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok(UserStats {
            total_links,
            total_clicks,
            weekly_clicks,
            new_links_this_week,
        })
    }

    /// Platform-wide statistics for the admin console.
    pub async fn admin_stats(pool: &PgPool) -> Result<AdminStats, sqlx::Error> {
        let (total_users, new_users_this_week): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), \
                    COUNT(*) FILTER (WHERE created_at >= now() - INTERVAL '7 days') \
             FROM users",
        )
        .fetch_one(pool)
        .await?;

        let (total_groups,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM groups")
            .fetch_one(pool)
            .await?;

        let (total_links, total_clicks, new_links_this_week): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), \
                    COALESCE(SUM(click_count), 0)::BIGINT, \
                    COUNT(*) FILTER (WHERE created_at >= now() - INTERVAL '7 days') \
             FROM websites",
        )
        .fetch_one(pool)
        .await?;

        Ok(AdminStats {
            total_users,
            total_links,
            total_groups,
            total_clicks,
            new_users_this_week,
            new_links_this_week,
        })
    }

    /// All users with their per-account usage counters, newest first.
    pub async fn users_with_stats(pool: &PgPool) -> Result<Vec<UserWithStats>, sqlx::Error> {
        sqlx::query_as::<_, UserWithStats>(
            "SELECT u.id, u.email, u.name, u.avatar, u.created_at, u.last_login, \
                    (SELECT COUNT(*) FROM websites w WHERE w.user_id = u.id) AS link_count, \
                    (SELECT COUNT(*) FROM groups g WHERE g.user_id = u.id) AS group_count, \
                    (SELECT COALESCE(SUM(w.click_count), 0)::BIGINT \
                       FROM websites w WHERE w.user_id = u.id) AS total_clicks \
             FROM users u \
             ORDER BY u.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }
}
