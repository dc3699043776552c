//! Repository for the single-row `admin` table.
//!
//! The admin identity is a password login separate from Google-authenticated
//! users; only the PHC-formatted hash is stored.

use sqlx::PgPool;

/// Provides access to the stored admin password hash.
pub struct AdminRepo;

impl AdminRepo {
    /// Fetch the stored password hash, if an admin password has been set.
    pub async fn get_password_hash(pool: &PgPool) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT password_hash FROM admin ORDER BY id LIMIT 1")
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(hash,)| hash))
    }

    /// Store a new password hash, replacing any existing one.
    pub async fn set_password_hash(pool: &PgPool, hash: &str) -> Result<(), sqlx::Error> {
        // Single-row table: clear and re-insert rather than tracking an id.
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM admin").execute(&mut *tx).await?;
        sqlx::query("INSERT INTO admin (password_hash, updated_at) VALUES ($1, now())")
            .bind(hash)
            .execute(&mut *tx)
            .await?;
        tx.commit().await
    }
}
