//! Queries over `users`, `auth_users` and `parent_child_relationships`.

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::{Role, User};

pub async fn find_by_id<'e, E: PgExecutor<'e>>(
    exec: E,
    id: Uuid,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(exec)
        .await
}

/// Login lookup. Names are matched case-insensitively after trimming.
pub async fn find_by_name_and_role<'e, E: PgExecutor<'e>>(
    exec: E,
    name: &str,
    role: Role,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE lower(name) = lower($1) AND role = $2")
        .bind(name.trim())
        .bind(role.as_str())
        .fetch_optional(exec)
        .await
}

pub async fn list_by_role<'e, E: PgExecutor<'e>>(
    exec: E,
    role: Role,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE role = $1 ORDER BY name")
        .bind(role.as_str())
        .fetch_all(exec)
        .await
}

pub async fn list_by_organization<'e, E: PgExecutor<'e>>(
    exec: E,
    organization_id: &str,
    role: Option<Role>,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM users
         WHERE organization_id = $1 AND ($2::text IS NULL OR role = $2)
         ORDER BY name",
    )
    .bind(organization_id)
    .bind(role.map(Role::as_str))
    .fetch_all(exec)
    .await
}

pub struct NewAccount<'a> {
    pub name: &'a str,
    pub role: Role,
    pub avatar: Option<&'a str>,
    pub organization_id: Option<&'a str>,
    pub created_by: Option<Uuid>,
}

/// Insert a user row. A clash on `(name, role)` surfaces as a unique
/// violation.
pub async fn insert<'e, E: PgExecutor<'e>>(
    exec: E,
    account: &NewAccount<'_>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO users (name, role, avatar, organization_id, created_by)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(account.name.trim())
    .bind(account.role.as_str())
    .bind(account.avatar)
    .bind(account.organization_id)
    .bind(account.created_by)
    .fetch_one(exec)
    .await
}

pub async fn insert_credentials<'e, E: PgExecutor<'e>>(
    exec: E,
    user_id: Uuid,
    email: &str,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO auth_users (user_id, email, password_hash) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(email)
        .bind(password_hash)
        .execute(exec)
        .await?;
    Ok(())
}

pub async fn password_hash<'e, E: PgExecutor<'e>>(
    exec: E,
    user_id: Uuid,
) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT password_hash FROM auth_users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(exec)
            .await?;
    Ok(row.map(|(hash,)| hash))
}

pub async fn update_password_hash<'e, E: PgExecutor<'e>>(
    exec: E,
    user_id: Uuid,
    password_hash: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE auth_users SET password_hash = $2, updated_at = now() WHERE user_id = $1",
    )
    .bind(user_id)
    .bind(password_hash)
    .execute(exec)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Idempotent: linking an already linked pair is not an error.
pub async fn link_parent_child<'e, E: PgExecutor<'e>>(
    exec: E,
    parent_id: Uuid,
    child_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO parent_child_relationships (parent_id, child_id) VALUES ($1, $2)
         ON CONFLICT DO NOTHING",
    )
    .bind(parent_id)
    .bind(child_id)
    .execute(exec)
    .await?;
    Ok(())
}

pub async fn is_parent_of<'e, E: PgExecutor<'e>>(
    exec: E,
    parent_id: Uuid,
    child_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row: Option<(i32,)> = sqlx::query_as(
        "SELECT 1 FROM parent_child_relationships WHERE parent_id = $1 AND child_id = $2",
    )
    .bind(parent_id)
    .bind(child_id)
    .fetch_optional(exec)
    .await?;
    Ok(row.is_some())
}

pub async fn children_of<'e, E: PgExecutor<'e>>(
    exec: E,
    parent_id: Uuid,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as(
        "SELECT u.* FROM users u
         JOIN parent_child_relationships r ON r.child_id = u.id
         WHERE r.parent_id = $1
         ORDER BY u.name",
    )
    .bind(parent_id)
    .fetch_all(exec)
    .await
}

/// Children the therapist created, plus every child in their organization.
pub async fn patients_of<'e, E: PgExecutor<'e>>(
    exec: E,
    therapist_id: Uuid,
    organization_id: Option<&str>,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM users
         WHERE role = 'child'
           AND (created_by = $1 OR ($2::text IS NOT NULL AND organization_id = $2))
         ORDER BY name",
    )
    .bind(therapist_id)
    .bind(organization_id)
    .fetch_all(exec)
    .await
}
