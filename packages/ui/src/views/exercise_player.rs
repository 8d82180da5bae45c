use api::Role;
use chrono::Utc;
use dioxus::prelude::*;
use practice::player::RECORDING_SECS;
use practice::{Exercise, Feedback, PlayerState, PracticeSession};

use crate::auth::sleep_secs;
use crate::components::{Button, ButtonVariant, Card, CardContent, CardHeader, ProgressBar};
use crate::icons::{FaCamera, FaCircleCheck, FaCircleXmark, FaMicrophone};
use crate::sync::{save_completion, use_sync};
use crate::{use_auth, Icon};

/// Runs one exercise step by step. Recording is simulated: each attempt
/// lasts [`RECORDING_SECS`] and yields the step's scripted outcome.
#[component]
pub fn ExercisePlayer(exercise: Exercise, on_exit: EventHandler<()>) -> Element {
    let auth = use_auth();
    let sync = use_sync();
    let mut session = use_signal(|| PracticeSession::new(exercise.clone()));
    let mut saved = use_signal(|| false);

    let wait_for_result = move || {
        spawn(async move {
            sleep_secs(RECORDING_SECS).await;
            session.with_mut(|s| s.finish_recording());
        });
    };

    let start = move |_| {
        if session.with_mut(|s| s.start_recording()) {
            wait_for_result();
        }
    };

    let retry = move |_| {
        if session.with_mut(|s| s.retry()) {
            wait_for_result();
        }
    };

    let next = move |_| {
        // Only the click that finishes the run records it
        if !session.with_mut(|s| s.next_step()) || !session.read().is_finished() {
            return;
        }
        let state = auth();
        let online = state.online;
        let Some(user) = state.user.filter(|u| u.role == Role::Child) else {
            return;
        };
        let Some(entry) = session.read().to_entry(&user.id, Utc::now()) else {
            return;
        };
        spawn(async move {
            save_completion(sync, online, entry).await;
            saved.set(true);
        });
    };

    let current = session.read();
    let percent = current.progress_percent();
    let player_state = current.state();
    let step = current.current_step().cloned();
    let first_try = current.correct_first_try();
    let total = current.exercise().steps.len();
    drop(current);

    rsx! {
        Card {
            class: "player",
            CardHeader {
                title: exercise.title.clone(),
                description: exercise.description.clone(),
                div {
                    class: "player__requirements",
                    if exercise.requires_microphone {
                        Icon { icon: FaMicrophone, width: 16, height: 16 }
                    }
                    if exercise.requires_camera {
                        Icon { icon: FaCamera, width: 16, height: 16 }
                    }
                }
            }
            CardContent {
                if player_state == PlayerState::Finished {
                    div {
                        class: "player__done",
                        Icon { icon: FaCircleCheck, width: 48, height: 48 }
                        h2 { "Exercise complete!" }
                        p { "{first_try} of {total} words right on the first try." }
                        if saved() {
                            if auth().online {
                                p { class: "muted", "Your progress has been saved." }
                            } else {
                                p { class: "muted", "Saved on this device. It will upload when you are back online." }
                            }
                        }
                        Button { onclick: move |_| on_exit.call(()), "Back to Exercises" }
                    }
                } else if let Some(step) = step {
                    if let Some(image) = step.image.clone() {
                        div {
                            class: "player__image",
                            img { src: "{image}", alt: "{step.word}" }
                        }
                    }
                    div {
                        class: "player__word",
                        h2 { "{step.word}" }
                        p { class: "muted", "Say this word clearly" }
                    }
                    div {
                        class: "player__controls",
                        match player_state {
                            PlayerState::Feedback(Feedback::Correct) => rsx! {
                                div {
                                    class: "feedback feedback--correct",
                                    Icon { icon: FaCircleCheck, width: 48, height: 48 }
                                    p { "Great job!" }
                                }
                                Button { onclick: next, "Next Word" }
                            },
                            PlayerState::Feedback(Feedback::Incorrect) => rsx! {
                                div {
                                    class: "feedback feedback--incorrect",
                                    Icon { icon: FaCircleXmark, width: 48, height: 48 }
                                    p { "Try again" }
                                }
                                Button { onclick: retry, "Try Again" }
                            },
                            PlayerState::Recording => rsx! {
                                Button {
                                    variant: ButtonVariant::Danger,
                                    class: "btn--round recording",
                                    disabled: true,
                                    "Recording..."
                                    Icon { icon: FaMicrophone, width: 18, height: 18 }
                                }
                            },
                            _ => rsx! {
                                Button {
                                    class: "btn--round",
                                    onclick: start,
                                    "Start Recording"
                                    Icon { icon: FaMicrophone, width: 18, height: 18 }
                                }
                            },
                        }
                    }
                }
                div {
                    class: "player__progress",
                    div {
                        class: "row",
                        span { "Progress" }
                        span { "{percent}%" }
                    }
                    ProgressBar { value: percent }
                }
                div {
                    class: "row",
                    Button { variant: ButtonVariant::Ghost, onclick: move |_| on_exit.call(()), "Exit" }
                    if !auth().online {
                        span { class: "offline-dot", "Offline Mode" }
                    }
                }
            }
        }
    }
}
