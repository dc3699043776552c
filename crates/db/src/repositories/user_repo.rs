//! Repository for the `users` table.

use linkdock_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{GoogleProfile, User};

/// Column list for `users` queries.
const USER_COLUMNS: &str = "id, email, name, avatar, google_id, created_at, last_login";

/// Provides account lookup and lifecycle operations.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by their Google subject identifier.
    pub async fn find_by_google_id(
        pool: &PgPool,
        google_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE google_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(google_id)
            .fetch_optional(pool)
            .await
    }

    /// Look up or create the account for a verified Google profile, stamping
    /// `last_login` either way.
    pub async fn login_or_create_from_google(
        pool: &PgPool,
        profile: &GoogleProfile,
    ) -> Result<User, sqlx::Error> {
        if let Some(user) = Self::find_by_google_id(pool, &profile.id).await? {
            Self::touch_last_login(pool, user.id).await?;
            return Ok(user);
        }

        let query = format!(
            "INSERT INTO users (email, name, avatar, google_id, last_login) \
             VALUES ($1, $2, $3, $4, now()) \
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&profile.email)
            .bind(&profile.name)
            .bind(&profile.picture)
            .bind(&profile.id)
            .fetch_one(pool)
            .await?;

        tracing::info!(user_id = user.id, email = %user.email, "New user created");
        Ok(user)
    }

    /// Update a user's `last_login` to now.
    pub async fn touch_last_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login = now() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete a user; their groups and websites cascade.
    /// Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
