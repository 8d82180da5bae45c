use dioxus::prelude::*;
use ui::views::Dashboard;

#[component]
pub fn Home() -> Element {
    rsx! { Dashboard {} }
}
