use dioxus::prelude::*;
use practice::{ExerciseFilter, ExerciseProgress};

use crate::components::{Button, ButtonVariant, Card, CardContent, CardHeader, ProgressBar, Tabs};
use crate::display::{difficulty_class, practice_label};
use crate::icons::{FaCamera, FaMicrophone};
use crate::views::ExercisePlayer;
use crate::Icon;

/// Exercise cards with filter tabs. Choosing one swaps the list for the
/// player; `on_finished` runs when the player is closed.
#[component]
pub fn ExerciseList(
    exercises: Vec<ExerciseProgress>,
    #[props(default)] show_filters: bool,
    on_finished: EventHandler<()>,
) -> Element {
    let mut filter = use_signal(|| ExerciseFilter::All);
    let mut playing = use_signal(|| Option::<String>::None);

    if let Some(id) = playing() {
        if let Some(item) = exercises.iter().find(|e| e.exercise.id == id) {
            return rsx! {
                ExercisePlayer {
                    exercise: item.exercise.clone(),
                    on_exit: move |_| {
                        playing.set(None);
                        on_finished.call(());
                    },
                }
            };
        }
    }

    let active = filter();
    let visible: Vec<ExerciseProgress> = exercises
        .iter()
        .filter(|e| active.matches(&e.exercise))
        .cloned()
        .collect();

    rsx! {
        if show_filters {
            Tabs {
                tabs: ExerciseFilter::tabs().iter().map(|f| f.label()).collect::<Vec<_>>(),
                active: active.label().to_string(),
                onselect: move |label: String| {
                    if let Some(f) = ExerciseFilter::tabs().into_iter().find(|f| f.label() == label) {
                        filter.set(f);
                    }
                },
            }
        }
        div {
            class: "grid grid--2",
            for item in visible {
                Card {
                    key: "{item.exercise.id}",
                    class: "exercise-card",
                    div { class: difficulty_class(item.exercise.difficulty) }
                    CardHeader {
                        title: item.exercise.title.clone(),
                        description: item.exercise.description.clone(),
                        div {
                            class: "exercise-card__meta",
                            span { class: "chip", "{item.exercise.kind.label()}" }
                            span { class: "chip", "{item.exercise.difficulty.label()}" }
                            if item.exercise.requires_microphone {
                                Icon { icon: FaMicrophone, width: 14, height: 14 }
                            }
                            if item.exercise.requires_camera {
                                Icon { icon: FaCamera, width: 14, height: 14 }
                            }
                        }
                    }
                    CardContent {
                        div {
                            class: "row",
                            span { "Progress" }
                            span { "{item.progress}%" }
                        }
                        ProgressBar { value: item.progress }
                        Button {
                            class: "w-full",
                            variant: if item.is_mastered() { ButtonVariant::Outline } else { ButtonVariant::Primary },
                            onclick: {
                                let id = item.exercise.id.clone();
                                move |_| playing.set(Some(id.clone()))
                            },
                            "{practice_label(item.progress)}"
                        }
                    }
                }
            }
        }
    }
}
