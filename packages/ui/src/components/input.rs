use dioxus::prelude::*;

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "label", r#for: "{html_for}", {children} }
    }
}

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] placeholder: String,
    value: String,
    #[props(default)] disabled: bool,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        input {
            id: "{id}",
            class: "input {class}",
            r#type: "{input_type}",
            placeholder: "{placeholder}",
            value: "{value}",
            disabled,
            oninput: move |evt| oninput.call(evt),
        }
    }
}

/// A `<select>` over `(value, label)` pairs. An empty `placeholder` adds no
/// blank option.
#[component]
pub fn Select(
    #[props(default)] id: String,
    options: Vec<(String, String)>,
    value: String,
    #[props(default)] placeholder: String,
    onchange: EventHandler<String>,
) -> Element {
    rsx! {
        select {
            id: "{id}",
            class: "input",
            value: "{value}",
            onchange: move |evt: FormEvent| onchange.call(evt.value()),
            if !placeholder.is_empty() {
                option { value: "", selected: value.is_empty(), "{placeholder}" }
            }
            for (v, label) in options {
                option { key: "{v}", value: "{v}", selected: v == value, "{label}" }
            }
        }
    }
}
