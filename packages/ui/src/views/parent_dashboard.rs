use api::UserInfo;
use dioxus::prelude::*;
use practice::ChildProgress;

use crate::components::{Alert, AlertKind, Avatar, Button, ButtonVariant, Card, CardContent, CardHeader, ProgressBar, Tabs};
use crate::display::last_practice;
use crate::icons::FaBell;
use crate::views::ChildOverview;
use crate::Icon;

/// What the lower half of the dashboard shows for the selected child.
enum Panel {
    NoChild,
    Loading,
    Failed(String),
    Ready(UserInfo, ChildProgress),
}

fn panel(child: Option<UserInfo>, progress: Option<Result<ChildProgress, String>>) -> Panel {
    match (child, progress) {
        (None, _) => Panel::NoChild,
        (Some(_), None) => Panel::Loading,
        (Some(_), Some(Err(message))) => Panel::Failed(message),
        (Some(child), Some(Ok(stats))) => Panel::Ready(child, stats),
    }
}

#[component]
pub fn ParentDashboard(user: UserInfo) -> Element {
    let mut selected = use_signal(|| Option::<String>::None);
    let mut tab = use_signal(|| "Progress".to_string());

    let children = use_resource(move || async move { api::get_my_children().await });

    let progress = use_resource(move || async move {
        let child_id = selected()?;
        Some(api::get_child_progress(child_id).await.map_err(|e| {
            tracing::warn!("Failed to load child progress: {}", e);
            e.to_string()
        }))
    });

    let children = match children() {
        None => return rsx! { p { class: "muted", "Loading..." } },
        Some(Err(e)) => {
            return rsx! { Alert { kind: AlertKind::Error, message: e.to_string() } };
        }
        Some(Ok(list)) => list,
    };

    // Select the first child by default
    if selected.peek().is_none() {
        if let Some(first) = children.first() {
            selected.set(Some(first.id.clone()));
        }
    }
    let current = selected().and_then(|id| children.iter().find(|c| c.id == id).cloned());

    rsx! {
        div {
            class: "dashboard",
            div {
                class: "dashboard__welcome row",
                div {
                    class: "grow",
                    h1 { "Welcome, {user.name}" }
                    p { class: "muted", "Monitor your child's speech therapy progress" }
                }
                Avatar { src: user.avatar_url(), alt: user.name.clone() }
            }
            if children.len() > 1 {
                Card {
                    CardHeader { title: "Your Children" }
                    CardContent {
                        div {
                            class: "chips",
                            for child in children.iter().cloned() {
                                Button {
                                    key: "{child.id}",
                                    variant: if selected() == Some(child.id.clone()) { ButtonVariant::Primary } else { ButtonVariant::Outline },
                                    onclick: {
                                        let id = child.id.clone();
                                        move |_| selected.set(Some(id.clone()))
                                    },
                                    Avatar { src: child.avatar_url(), alt: child.name.clone(), class: "avatar--xs" }
                                    "{child.name}"
                                }
                            }
                        }
                    }
                }
            }
            match panel(current, progress().flatten()) {
                Panel::NoChild => rsx! {
                    Card {
                        CardContent {
                            class: "empty",
                            p { class: "muted", "No children assigned to your account yet." }
                            p { class: "muted small", "Please contact your therapist or administrator." }
                        }
                    }
                },
                Panel::Loading => rsx! { p { class: "muted", "Loading..." } },
                Panel::Failed(message) => rsx! { Alert { kind: AlertKind::Error, message } },
                Panel::Ready(child, stats) => rsx! {
                    ChildOverview { child: child.clone(), stats: stats.clone() }
                    Tabs {
                        tabs: vec!["Progress", "Reminders", "Reports"],
                        active: tab(),
                        onselect: move |t| tab.set(t),
                    }
                    match tab().as_str() {
                        "Reminders" => rsx! { RemindersTab {} },
                        "Reports" => rsx! { ReportsTab { child, stats } },
                        _ => rsx! { ProgressTab { stats } },
                    }
                },
            }
        }
    }
}

#[component]
fn ProgressTab(stats: ChildProgress) -> Element {
    rsx! {
        h2 { "Exercise Progress" }
        for item in stats.exercises.iter().cloned() {
            Card {
                key: "{item.exercise.id}",
                CardContent {
                    div {
                        class: "row",
                        h3 { class: "grow", "{item.exercise.title}" }
                        span { "{item.progress}%" }
                    }
                    ProgressBar { value: item.progress }
                }
            }
        }
        h2 { "Weekly Activity" }
        Card {
            CardContent {
                div {
                    class: "row",
                    span { class: "muted", "Practiced {stats.weekly.days_practiced} of the last 7 days" }
                    span { "{stats.weekly.percent}%" }
                }
                ProgressBar { value: stats.weekly.percent }
                p { class: "muted small", "Last practice: {last_practice(stats.last_practiced)}" }
            }
        }
    }
}

#[component]
fn RemindersTab() -> Element {
    rsx! {
        h2 { "Practice Reminders" }
        Card {
            class: "card--dashed",
            CardContent {
                class: "empty",
                Icon { icon: FaBell, width: 28, height: 28 }
                p { class: "muted", "Practice reminders will be available in a future update." }
            }
        }
    }
}

#[component]
fn ReportsTab(child: UserInfo, stats: ChildProgress) -> Element {
    let overall = stats.overall();
    rsx! {
        h2 { "Progress Reports" }
        Card {
            CardHeader { title: "Summary", description: child.name.clone() }
            CardContent {
                h4 { "Overall Progress" }
                div {
                    class: "row",
                    ProgressBar { value: overall, class: "grow" }
                    span { "{overall}%" }
                }
                div {
                    class: "grid grid--2",
                    div {
                        h4 { "Practice Sessions" }
                        p { class: "stat-card__value", "{stats.sessions} " span { class: "muted small", "sessions" } }
                    }
                    div {
                        h4 { "Points" }
                        p { class: "stat-card__value", "{stats.points}" }
                    }
                }
            }
        }
        Card {
            CardHeader { title: "Sound Mastery" }
            CardContent {
                for item in stats.exercises.iter().cloned() {
                    div {
                        key: "{item.exercise.id}",
                        class: "row",
                        span { class: "grow", "{item.exercise.title}" }
                        ProgressBar { value: item.progress, class: "progress--narrow" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Role;
    use chrono::NaiveDate;

    fn child() -> UserInfo {
        UserInfo {
            id: "c-1".to_string(),
            name: "Mia".to_string(),
            role: Role::Child,
            avatar: None,
            organization_id: None,
            created_by: None,
        }
    }

    #[test]
    fn test_progress_error_is_shown() {
        let failed = panel(Some(child()), Some(Err("Not found: Child".to_string())));
        assert!(matches!(failed, Panel::Failed(m) if m == "Not found: Child"));
    }

    #[test]
    fn test_panel_states() {
        assert!(matches!(panel(None, None), Panel::NoChild));
        assert!(matches!(panel(Some(child()), None), Panel::Loading));

        let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let stats = practice::progress::score("c-1", &[], &practice::catalog::exercises(), today);
        assert!(matches!(
            panel(Some(child()), Some(Ok(stats))),
            Panel::Ready(c, s) if c.id == "c-1" && s.sessions == 0
        ));
    }
}
