use dioxus::prelude::*;

#[component]
pub fn Avatar(src: String, alt: String, #[props(default)] class: String) -> Element {
    rsx! {
        img { class: "avatar {class}", src: "{src}", alt: "{alt}" }
    }
}
