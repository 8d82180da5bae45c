//! Boolean flags in `app_settings`.

use sqlx::PgExecutor;

pub const ADMIN_SIGNUP_COMPLETED: &str = "admin_signup_completed";

/// A missing row reads as `false`.
pub async fn flag<'e, E: PgExecutor<'e>>(exec: E, key: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(bool,)> =
        sqlx::query_as("SELECT value = 'true'::jsonb FROM app_settings WHERE key = $1")
            .bind(key)
            .fetch_optional(exec)
            .await?;
    Ok(row.map(|(v,)| v).unwrap_or(false))
}

/// Like [`flag`] but locks the row until the surrounding transaction ends.
pub async fn flag_for_update<'e, E: PgExecutor<'e>>(
    exec: E,
    key: &str,
) -> Result<bool, sqlx::Error> {
    let row: Option<(bool,)> = sqlx::query_as(
        "SELECT value = 'true'::jsonb FROM app_settings WHERE key = $1 FOR UPDATE",
    )
    .bind(key)
    .fetch_optional(exec)
    .await?;
    Ok(row.map(|(v,)| v).unwrap_or(false))
}

pub async fn set_flag<'e, E: PgExecutor<'e>>(
    exec: E,
    key: &str,
    value: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO app_settings (key, value) VALUES ($1, to_jsonb($2::boolean))
         ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value",
    )
    .bind(key)
    .bind(value)
    .execute(exec)
    .await?;
    Ok(())
}
