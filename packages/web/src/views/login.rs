//! Login page view.

use dioxus::prelude::*;
use ui::use_auth;
use ui::views::LoginView;

use crate::Route;

#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    // Already signed in, go to the dashboard
    use_effect(move || {
        let state = auth();
        if !state.loading && state.user.is_some() {
            nav.replace(Route::Home {});
        }
    });

    rsx! {
        LoginView {
            on_signed_in: move |_| {
                nav.replace(Route::Home {});
            },
        }
    }
}
