//! Session helpers. The session stores only the signed-in user's id.

use sqlx::PgPool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::db::users;
use crate::error::ApiError;
use crate::models::User;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// A session holding something that is not a UUID counts as signed out.
fn parse_user_id(raw: Option<String>) -> Option<Uuid> {
    raw.and_then(|id| Uuid::parse_str(&id).ok())
}

/// The signed-in user, or `None`. A session pointing at a deleted user is
/// treated as signed out.
pub async fn current_user(session: &Session, pool: &PgPool) -> Result<Option<User>, ApiError> {
    let raw: Option<String> = session.get(SESSION_USER_ID_KEY).await?;
    let Some(user_id) = parse_user_id(raw) else {
        return Ok(None);
    };
    Ok(users::find_by_id(pool, user_id).await?)
}

pub async fn require_user(session: &Session, pool: &PgPool) -> Result<User, ApiError> {
    current_user(session, pool)
        .await?
        .ok_or(ApiError::Unauthenticated)
}

/// Issue a fresh session id before binding the user, so a pre-login id
/// cannot be reused.
pub async fn sign_in(session: &Session, user: &User) -> Result<(), ApiError> {
    session.cycle_id().await?;
    session
        .insert(SESSION_USER_ID_KEY, user.id.to_string())
        .await?;
    Ok(())
}

pub async fn sign_out(session: &Session) -> Result<(), ApiError> {
    session.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(Some(id.to_string())), Some(id));
        assert_eq!(parse_user_id(Some("garbage".into())), None);
        assert_eq!(parse_user_id(None), None);
    }
}
