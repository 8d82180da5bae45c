//! Authentication context and hooks for the UI.

use api::UserInfo;
use dioxus::prelude::*;
use practice::CompanionConfig;

use crate::journal;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
    /// Whether the server is reachable (last connectivity check succeeded).
    pub online: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            online: false,
        }
    }
}

impl AuthState {
    /// State after a server round trip answered `user`.
    fn reachable(user: Option<UserInfo>) -> Self {
        Self {
            user,
            loading: false,
            online: true,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub(crate) async fn sleep_secs(secs: u64) {
    let duration = std::time::Duration::from_secs(secs);
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// The server's session user, unless this device logged out while offline.
fn session_user(server_user: Option<UserInfo>, logout_pending: bool) -> Option<UserInfo> {
    if logout_pending {
        None
    } else {
        server_user
    }
}

/// Ends a server session left behind by an offline logout before the
/// server's answer is accepted.
async fn settle_session(server_user: Option<UserInfo>) -> Option<UserInfo> {
    let pending = journal::logout_pending().await;
    if pending && server_user.is_some() {
        match api::logout().await {
            Ok(()) => {
                tracing::info!("Finished logout made while offline");
                journal::clear_logout_pending().await;
            }
            Err(e) => tracing::warn!("Deferred logout failed: {}", e),
        }
    } else if pending {
        journal::clear_logout_pending().await;
    }
    session_user(server_user, pending)
}

/// Provider component that manages authentication state.
///
/// Fetches the session user on mount. When the server cannot be reached, a
/// remembered child account is restored so practice can continue offline.
#[component]
pub fn AuthProvider(
    #[props(default = CompanionConfig::default().sync.connectivity_check_secs)]
    check_secs: u32,
    children: Element,
) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Fetch the current user on mount
    let _ = use_resource(move || async move {
        match api::get_current_user().await {
            Ok(user) => auth_state.set(AuthState::reachable(settle_session(user).await)),
            Err(e) => {
                tracing::warn!("Server unreachable, starting offline: {}", e);
                let user = journal::remembered_child().await;
                auth_state.set(AuthState {
                    user,
                    loading: false,
                    online: false,
                });
            }
        }
    });

    // Periodic connectivity check
    use_effect(move || {
        spawn(async move {
            loop {
                sleep_secs(u64::from(check_secs.max(1))).await;

                // Don't check while initial load is still in progress
                if auth_state().loading {
                    continue;
                }
                match api::get_current_user().await {
                    Ok(user) => {
                        let next = AuthState::reachable(settle_session(user).await);
                        if auth_state() != next {
                            if !auth_state().online {
                                tracing::info!("Connection restored");
                            }
                            auth_state.set(next);
                        }
                    }
                    Err(_) => {
                        if auth_state().online {
                            tracing::info!("Connection lost, switching to offline mode");
                            let current = auth_state();
                            auth_state.set(AuthState {
                                online: false,
                                ..current
                            });
                        }
                    }
                }
            }
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let nav = use_navigator();

    let onclick = move |_| async move {
        if auth_state().online {
            if let Err(e) = api::logout().await {
                tracing::error!("Logout failed: {}", e);
                return;
            }
        } else {
            // Ended on the server at the next successful session check
            journal::mark_logout_pending().await;
        }
        journal::forget_user().await;
        auth_state.set(AuthState {
            user: None,
            loading: false,
            online: auth_state().online,
        });
        nav.replace("/login");
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Role;

    fn child() -> UserInfo {
        UserInfo {
            id: "c-1".to_string(),
            name: "Mia".to_string(),
            role: Role::Child,
            avatar: None,
            organization_id: None,
            created_by: None,
        }
    }

    #[test]
    fn test_offline_logout_is_not_undone_on_reconnect() {
        assert_eq!(session_user(Some(child()), true), None);
    }

    #[test]
    fn test_session_user_without_pending_logout() {
        assert_eq!(session_user(Some(child()), false), Some(child()));
        assert_eq!(session_user(None, false), None);
    }
}
