//! Platform journal constructors.
//!
//! Picks the [`practice::JournalStore`] for the build:
//! - **Web** (WASM + `web` feature): IndexedDB via [`practice::IdbStore`]
//! - **Native**: filesystem via [`practice::FileStore`]
//!
//! The unscoped store also remembers the last signed-in user, which lets a
//! child keep practicing when the app starts without a connection.

use api::{Role, UserInfo};
use practice::{Journal, JournalStore};
use serde::{Deserialize, Serialize};

const LAST_USER_KEY: &str = "last_user";
const NOTIFICATIONS_KEY: &str = "notifications";
const LOGOUT_PENDING_KEY: &str = "logout_pending";

/// Per-user notification choices from the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPrefs {
    pub practice_reminders: bool,
    pub progress_reports: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            practice_reminders: true,
            progress_reports: true,
        }
    }
}

/// Platform store scoped to an optional user id.
///
/// When `user_id` is `Some("uuid")`:
/// - **Web**: opens IndexedDB database `"companion-uuid"`
/// - **Native**: uses `<data_dir>/speech-companion/uuid/`
fn store_for(user_id: Option<&str>) -> impl JournalStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        practice::IdbStore::with_namespace(user_id)
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("speech-companion");
        let scoped = match user_id {
            Some(id) => base.join(id),
            None => base,
        };
        practice::FileStore::new(scoped)
    }
}

/// The offline progress journal of one child.
pub fn make_journal_for_user(user_id: &str) -> Journal<impl JournalStore> {
    Journal::new(store_for(Some(user_id)))
}

pub async fn remember_user(user: &UserInfo) {
    match serde_json::to_vec(user) {
        Ok(bytes) => store_for(None).put(LAST_USER_KEY, bytes).await,
        Err(e) => tracing::warn!("Failed to remember user: {}", e),
    }
}

pub async fn forget_user() {
    store_for(None).delete(LAST_USER_KEY).await;
}

/// Record a logout made offline; the server session still has to be ended.
pub async fn mark_logout_pending() {
    store_for(None).put(LOGOUT_PENDING_KEY, b"1".to_vec()).await;
}

pub async fn logout_pending() -> bool {
    store_for(None).get(LOGOUT_PENDING_KEY).await.is_some()
}

pub async fn clear_logout_pending() {
    store_for(None).delete(LOGOUT_PENDING_KEY).await;
}

/// The remembered user, if it is a child. Other roles need the server.
pub async fn remembered_child() -> Option<UserInfo> {
    let bytes = store_for(None).get(LAST_USER_KEY).await?;
    serde_json::from_slice::<UserInfo>(&bytes)
        .ok()
        .filter(|user| user.role == Role::Child)
}

/// Offline sign-in: succeeds only for the remembered child, by name.
pub async fn offline_sign_in(username: &str) -> Option<UserInfo> {
    remembered_child()
        .await
        .filter(|user| user.name.eq_ignore_ascii_case(username.trim()))
}

pub async fn load_notification_prefs(user_id: &str) -> NotificationPrefs {
    let Some(bytes) = store_for(Some(user_id)).get(NOTIFICATIONS_KEY).await else {
        return NotificationPrefs::default();
    };
    serde_json::from_slice(&bytes).unwrap_or_default()
}

pub async fn save_notification_prefs(user_id: &str, prefs: NotificationPrefs) -> bool {
    match serde_json::to_vec(&prefs) {
        Ok(bytes) => {
            store_for(Some(user_id)).put(NOTIFICATIONS_KEY, bytes).await;
            true
        }
        Err(e) => {
            tracing::warn!("Failed to save notification preferences: {}", e);
            false
        }
    }
}
