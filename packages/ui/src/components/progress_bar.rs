use dioxus::prelude::*;
use dioxus_primitives::progress::{Progress, ProgressIndicator};

fn fill(value: u8) -> u8 {
    value.min(100)
}

/// Percentage bar on the accessible progress primitive.
#[component]
pub fn ProgressBar(value: u8, #[props(default)] class: String) -> Element {
    let width = fill(value);
    rsx! {
        Progress {
            class: "progress {class}",
            value: Some(f64::from(width)),
            max: 100.0,
            ProgressIndicator { class: "progress__fill", style: "width: {width}%" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_is_clamped() {
        assert_eq!(fill(40), 40);
        assert_eq!(fill(100), 100);
        assert_eq!(fill(250), 100);
    }
}
