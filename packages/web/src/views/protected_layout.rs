use dioxus::prelude::*;
use ui::use_auth;
use ui::views::AppLayout;

use crate::Route;

/// Wraps every signed-in route. Waits for the first auth check, then either
/// renders the page inside the app layout or sends the visitor to `/login`.
#[component]
pub fn ProtectedLayout() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        let state = auth();
        if !state.loading && state.user.is_none() {
            nav.replace(Route::Login {});
        }
    });

    let state = auth();
    if state.loading {
        return rsx! {
            div { class: "login-page", p { class: "muted", "Loading..." } }
        };
    }
    if state.user.is_none() {
        return rsx! {};
    }

    rsx! {
        AppLayout {
            Outlet::<Route> {}
        }
    }
}
