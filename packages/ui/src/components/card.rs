use dioxus::prelude::*;

#[component]
pub fn Card(#[props(default)] class: String, children: Element) -> Element {
    rsx! {
        div { class: "card {class}", {children} }
    }
}

#[component]
pub fn CardHeader(
    title: String,
    #[props(default)] description: String,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "card__header",
            h3 { class: "card__title", "{title}" }
            if !description.is_empty() {
                p { class: "card__description", "{description}" }
            }
            {children}
        }
    }
}

#[component]
pub fn CardContent(#[props(default)] class: String, children: Element) -> Element {
    rsx! {
        div { class: "card__content {class}", {children} }
    }
}

/// Headline figure with a caption, as used in the dashboard summary rows.
#[component]
pub fn StatCard(label: String, value: String, #[props(default)] accent: String) -> Element {
    rsx! {
        Card {
            class: "stat-card",
            CardContent {
                p { class: "stat-card__label", "{label}" }
                p { class: "stat-card__value {accent}", "{value}" }
            }
        }
    }
}
