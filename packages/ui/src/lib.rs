//! Shared screens of the speech therapy companion.
//!
//! Everything a platform entry point needs: the auth and sync providers, the
//! signed-in layout and one view per route.

use dioxus::prelude::*;

pub mod components;
pub mod display;
pub mod journal;
pub mod views;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

mod sync;
pub use sync::{use_sync, SyncProvider, SyncState};

mod online_indicator;
pub use online_indicator::OnlineIndicator;
