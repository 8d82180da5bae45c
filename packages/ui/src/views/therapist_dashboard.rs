use api::models::search_by_name;
use api::{Role, UserInfo};
use dioxus::prelude::*;
use practice::{catalog, progress, ChildProgress};

use crate::components::{
    Alert, AlertKind, Avatar, Button, ButtonVariant, Card, CardContent, CardHeader, Input, ProgressBar,
    StatCard, Tabs,
};
use crate::display::{difficulty_class, last_practice};
use crate::icons::{FaCalendar, FaMagnifyingGlass, FaUserPlus};
use crate::views::admin_dashboard::{creatable_by, AssignPatientForm, CreateUserForm};
use crate::views::ChildOverview;
use crate::Icon;

#[derive(Debug, Clone, PartialEq)]
struct Patient {
    info: UserInfo,
    stats: Option<ChildProgress>,
}

impl Patient {
    fn overall(&self) -> u8 {
        self.stats.as_ref().map(ChildProgress::overall).unwrap_or(0)
    }
}

async fn load_patients() -> Result<Vec<Patient>, ServerFnError> {
    let infos = api::get_my_patients().await?;
    let mut patients = Vec::with_capacity(infos.len());
    for info in infos {
        let stats = match api::get_child_progress(info.id.clone()).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::warn!("No progress for patient {}: {}", info.id, e);
                None
            }
        };
        patients.push(Patient { info, stats });
    }
    Ok(patients)
}

#[component]
pub fn TherapistDashboard(user: UserInfo) -> Element {
    let mut tab = use_signal(|| "Patients".to_string());
    let mut query = use_signal(String::new);
    let mut selected = use_signal(|| Option::<String>::None);
    let mut adding = use_signal(|| false);

    let mut loaded = use_resource(load_patients);

    let patients = match loaded() {
        None => return rsx! { p { class: "muted", "Loading..." } },
        Some(Err(e)) => {
            return rsx! { Alert { kind: AlertKind::Error, message: e.to_string() } };
        }
        Some(Ok(list)) => list,
    };

    let overall: Vec<u8> = patients.iter().map(Patient::overall).collect();
    let average = progress::average_progress(&overall);

    let infos: Vec<UserInfo> = patients.iter().map(|p| p.info.clone()).collect();
    let visible: Vec<Patient> = search_by_name(&infos, &query())
        .into_iter()
        .filter_map(|info| patients.iter().find(|p| p.info.id == info.id).cloned())
        .collect();
    let detail = selected().and_then(|id| patients.iter().find(|p| p.info.id == id).cloned());

    rsx! {
        div {
            class: "dashboard",
            div {
                class: "dashboard__welcome",
                h1 { "Welcome, {user.name}" }
                p { class: "muted", "Manage your patients and their exercises" }
            }
            div {
                class: "grid grid--2",
                StatCard { label: "Total Patients", value: patients.len().to_string() }
                StatCard { label: "Average Progress", value: format!("{average}%") }
            }
            Tabs {
                tabs: vec!["Patients", "Schedule", "Exercises"],
                active: tab(),
                onselect: move |t| tab.set(t),
            }
            match tab().as_str() {
                "Schedule" => rsx! { ScheduleTab {} },
                "Exercises" => rsx! { ExercisesTab {} },
                _ => rsx! {
                    if let Some(patient) = detail {
                        PatientDetail { patient, on_back: move |_| selected.set(None) }
                    } else if adding() {
                        Button { variant: ButtonVariant::Ghost, onclick: move |_| adding.set(false), "Back to patients" }
                        div {
                            class: "grid grid--2",
                            CreateUserForm {
                                roles: creatable_by(Role::Therapist),
                                organization_id: user.organization_id.clone().unwrap_or_default(),
                                on_created: move |_| loaded.restart(),
                            }
                            AssignPatientForm {}
                        }
                    } else {
                        div {
                            class: "row",
                            div {
                                class: "search grow",
                                Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                                Input {
                                    placeholder: "Search patients...",
                                    value: query(),
                                    oninput: move |evt: FormEvent| query.set(evt.value()),
                                }
                            }
                            Button {
                                onclick: move |_| adding.set(true),
                                Icon { icon: FaUserPlus, width: 14, height: 14 }
                                "Add Patient"
                            }
                        }
                        if visible.is_empty() {
                            p { class: "muted", "No patients found." }
                        }
                        for patient in visible {
                            Card {
                                key: "{patient.info.id}",
                                CardContent {
                                    div {
                                        class: "row",
                                        Avatar { src: patient.info.avatar_url(), alt: patient.info.name.clone() }
                                        div {
                                            class: "grow",
                                            h3 { "{patient.info.name}" }
                                            p {
                                                class: "muted small",
                                                "Last practice: {last_practice(patient.stats.as_ref().and_then(|s| s.last_practiced))}"
                                            }
                                        }
                                        ProgressBar { value: patient.overall(), class: "progress--narrow" }
                                        span { "{patient.overall()}%" }
                                        Button {
                                            variant: ButtonVariant::Outline,
                                            onclick: {
                                                let id = patient.info.id.clone();
                                                move |_| selected.set(Some(id.clone()))
                                            },
                                            "View"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn PatientDetail(patient: Patient, on_back: EventHandler<()>) -> Element {
    rsx! {
        Button { variant: ButtonVariant::Ghost, onclick: move |_| on_back.call(()), "Back to patients" }
        match patient.stats {
            Some(stats) => rsx! {
                ChildOverview { child: patient.info.clone(), stats: stats.clone() }
                Card {
                    CardHeader { title: "Exercise Progress" }
                    CardContent {
                        for item in stats.exercises {
                            div {
                                key: "{item.exercise.id}",
                                class: "row",
                                span { class: "grow", "{item.exercise.title}" }
                                ProgressBar { value: item.progress, class: "progress--narrow" }
                                span { "{item.progress}%" }
                            }
                        }
                    }
                }
            },
            None => rsx! {
                Alert { kind: AlertKind::Info, message: "Progress for {patient.info.name} is not available right now." }
            },
        }
    }
}

#[component]
fn ScheduleTab() -> Element {
    rsx! {
        h2 { "Upcoming Sessions" }
        Card {
            class: "card--dashed",
            CardContent {
                class: "empty",
                Icon { icon: FaCalendar, width: 28, height: 28 }
                p { class: "muted", "Session scheduling will be available in a future update." }
            }
        }
    }
}

#[component]
fn ExercisesTab() -> Element {
    rsx! {
        h2 { "Exercise Library" }
        div {
            class: "grid grid--3",
            for exercise in catalog::exercises() {
                Card {
                    key: "{exercise.id}",
                    div { class: difficulty_class(exercise.difficulty) }
                    CardHeader { title: exercise.title.clone(), description: exercise.description.clone() }
                    CardContent {
                        div {
                            class: "chips",
                            span { class: "chip", "{exercise.kind.label()}" }
                            span { class: "chip", "{exercise.difficulty.label()}" }
                            span { class: "chip", "{exercise.steps.len()} words" }
                        }
                    }
                }
            }
        }
    }
}
