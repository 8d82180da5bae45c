use chrono::Local;
use dioxus::prelude::*;

use crate::components::Avatar;
use crate::display::{footer_text, role_badge_class};
use crate::icons::FaGear;
use crate::{use_auth, Icon, LogoutButton, OnlineIndicator};

/// Header, content area and footer around every signed-in screen.
#[component]
pub fn AppLayout(children: Element) -> Element {
    let auth = use_auth();
    let today = Local::now().date_naive();

    rsx! {
        div {
            class: "app",
            header {
                class: "app-header",
                div {
                    class: "app-header__brand",
                    h1 { class: "app-header__title", "Speech Therapy Companion" }
                    if let Some(user) = auth().user {
                        span { class: role_badge_class(user.role), "{user.role.label()}" }
                    }
                }
                div {
                    class: "app-header__actions",
                    OnlineIndicator {}
                    if let Some(user) = auth().user {
                        Avatar { src: user.avatar_url(), alt: user.name.clone(), class: "avatar--sm" }
                        span { class: "app-header__name", "{user.name}" }
                        Link {
                            class: "btn btn--ghost",
                            to: "/settings",
                            Icon { icon: FaGear, width: 16, height: 16 }
                        }
                        LogoutButton { class: "btn btn--outline" }
                    }
                }
            }
            main { class: "app-main", {children} }
            footer { class: "app-footer", "{footer_text(today)}" }
        }
    }
}
