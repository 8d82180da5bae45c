use api::Role;
use dioxus::prelude::*;
use practice::{catalog, ExerciseProgress};

use crate::sync::use_sync;
use crate::use_auth;
use crate::views::{
    load_child_progress, AdminDashboard, ChildDashboard, ExerciseList, ParentDashboard, TherapistDashboard,
};

/// The home screen of whoever is signed in.
#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let Some(user) = auth().user else {
        return rsx! {};
    };

    match user.role {
        Role::Child => rsx! { ChildDashboard { user } },
        Role::Parent => rsx! { ParentDashboard { user } },
        Role::Therapist => rsx! { TherapistDashboard { user } },
        Role::Admin => rsx! { AdminDashboard { user } },
    }
}

/// Full exercise list with filters. Children see their own progress; staff
/// and parents get a preview of the catalog.
#[component]
pub fn ExercisesView() -> Element {
    let auth = use_auth();
    let sync = use_sync();

    let mut exercises = use_resource(move || {
        let user = auth().user;
        let _ = sync().last_synced;
        async move {
            match user {
                Some(user) if user.role == Role::Child => load_child_progress(&user.id).await.0.exercises,
                _ => catalog::exercises()
                    .into_iter()
                    .map(|exercise| ExerciseProgress { exercise, progress: 0 })
                    .collect(),
            }
        }
    });

    let Some(list) = exercises() else {
        return rsx! { p { class: "muted", "Loading..." } };
    };

    rsx! {
        div {
            class: "dashboard",
            h1 { "Exercises" }
            ExerciseList {
                exercises: list,
                show_filters: true,
                on_finished: move |_| exercises.restart(),
            }
        }
    }
}
