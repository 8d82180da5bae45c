//! Online/offline status indicator for the header.

use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::icons::{FaWifi, FaCloudArrowUp};
use crate::sync::use_sync;
use crate::Icon;

/// - **Online**: green wifi icon, "Online"
/// - **Offline**: amber cloud icon, "Offline Mode", plus the number of
///   results waiting for upload
#[component]
pub fn OnlineIndicator() -> Element {
    let auth = use_auth();
    let sync = use_sync();
    let state = auth();

    if state.loading {
        return rsx! {};
    }

    let pending = sync().pending;

    if state.online {
        rsx! {
            span {
                class: "online-indicator online-indicator--online",
                title: "Online",
                Icon { icon: FaWifi, width: 14, height: 14 }
                "Online"
            }
        }
    } else {
        rsx! {
            span {
                class: "online-indicator online-indicator--offline",
                title: "Offline Mode",
                Icon { icon: FaCloudArrowUp, width: 14, height: 14 }
                "Offline Mode"
                if pending > 0 {
                    span { class: "online-indicator__pending", " ({pending} to upload)" }
                }
            }
        }
    }
}
