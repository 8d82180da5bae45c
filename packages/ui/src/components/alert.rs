use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertKind {
    Error,
    Success,
    Info,
}

#[component]
pub fn Alert(kind: AlertKind, message: String) -> Element {
    let class = match kind {
        AlertKind::Error => "alert alert--error",
        AlertKind::Success => "alert alert--success",
        AlertKind::Info => "alert alert--info",
    };
    rsx! {
        div { class, role: "alert", "{message}" }
    }
}
