use dioxus::prelude::*;
use ui::views::ExercisesView;

#[component]
pub fn Exercises() -> Element {
    rsx! { ExercisesView {} }
}
