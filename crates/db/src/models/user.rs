//! User models and session DTOs.

use linkdock_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub google_id: Option<String>,
    pub created_at: Timestamp,
    pub last_login: Option<Timestamp>,
}

/// Identity payload handed back to the client after login.
#[derive(Debug, Clone, Serialize)]
pub struct UserSession {
    pub user_id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub is_admin: bool,
}

impl UserSession {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            // Google-authenticated users are never admins; the admin
            // identity is a separate password login.
            is_admin: false,
        }
    }
}

/// Profile fields obtained from a verified Google ID token.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    /// Google's stable subject identifier.
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}
