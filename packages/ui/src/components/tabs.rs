use dioxus::prelude::*;

/// Tab strip. Content is rendered by the caller based on `active`.
#[component]
pub fn Tabs(tabs: Vec<&'static str>, active: String, onselect: EventHandler<String>) -> Element {
    rsx! {
        div {
            class: "tabs",
            role: "tablist",
            for tab in tabs {
                button {
                    key: "{tab}",
                    r#type: "button",
                    role: "tab",
                    class: if tab == active { "tabs__tab tabs__tab--active" } else { "tabs__tab" },
                    onclick: move |_| onselect.call(tab.to_string()),
                    "{tab}"
                }
            }
        }
    }
}
