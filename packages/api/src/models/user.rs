//! # User model
//!
//! Two representations of an account:
//!
//! ## [`User`] (server only)
//!
//! The row of the `users` table, loaded with [`sqlx::FromRow`]:
//!
//! - `id` — primary key (`UUID`).
//! - `name` — the login name; unique together with `role`.
//! - `role` — stored as text, decoded into [`Role`].
//! - `avatar` — optional picture URL.
//! - `organization_id` — the clinic the account belongs to.
//! - `created_by` — the admin or therapist who created the account (`NULL` for
//!   the bootstrap admin).
//!
//! Credentials live in `auth_users`, never on this struct.
//!
//! ## [`UserInfo`]
//!
//! The client-safe projection that crosses the server-function boundary. Ids
//! are strings so the type works in WASM.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

use super::Role;

const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// Generated avatar URL for a seed (usually the user's name).
pub fn avatar_for(seed: &str) -> String {
    format!("{AVATAR_BASE}{seed}")
}

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub avatar: Option<String>,
    pub organization_id: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl User {
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            name: self.name.clone(),
            role: self.role,
            avatar: self.avatar.clone(),
            organization_id: self.organization_id.clone(),
            created_by: self.created_by.map(|id| id.to_string()),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub avatar: Option<String>,
    pub organization_id: Option<String>,
    pub created_by: Option<String>,
}

impl UserInfo {
    /// Stored avatar, or one generated from the name.
    pub fn avatar_url(&self) -> String {
        self.avatar.clone().unwrap_or_else(|| avatar_for(&self.name))
    }
}

/// Account to be created by an admin or therapist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub role: Role,
    pub organization_id: Option<String>,
    pub avatar: Option<String>,
}

/// Case-insensitive name search, as used by the therapist's patient list.
pub fn search_by_name<'a>(users: &'a [UserInfo], query: &str) -> Vec<&'a UserInfo> {
    let query = query.trim().to_lowercase();
    users
        .iter()
        .filter(|u| query.is_empty() || u.name.to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, avatar: Option<&str>) -> UserInfo {
        UserInfo {
            id: name.to_lowercase(),
            name: name.to_string(),
            role: Role::Child,
            avatar: avatar.map(str::to_string),
            organization_id: Some("org-1".to_string()),
            created_by: None,
        }
    }

    #[test]
    fn test_avatar_fallback() {
        assert_eq!(
            user("Alex", None).avatar_url(),
            "https://api.dicebear.com/7.x/avataaars/svg?seed=Alex"
        );
        assert_eq!(user("Sam", Some("/me.png")).avatar_url(), "/me.png");
    }

    #[test]
    fn test_search_by_name() {
        let users = vec![
            user("Alex Johnson", None),
            user("Sam Taylor", None),
            user("Jamie Smith", None),
        ];
        let hits = search_by_name(&users, "  sam ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Sam Taylor");

        assert_eq!(search_by_name(&users, "").len(), 3);
        assert_eq!(search_by_name(&users, "JOHN").len(), 1);
        assert!(search_by_name(&users, "zoe").is_empty());
    }
}
