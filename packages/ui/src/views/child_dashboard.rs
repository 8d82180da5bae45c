use api::UserInfo;
use chrono::Local;
use dioxus::prelude::*;
use practice::{catalog, progress, ChildProgress};

use crate::components::{Alert, AlertKind, Avatar, Card, CardContent, CardHeader, StatCard, Tabs};
use crate::display::{format_date, weekly_badge};
use crate::journal::make_journal_for_user;
use crate::sync::use_sync;
use crate::views::ExerciseList;

/// Server progress for a child. Offline, falls back to scoring what is
/// waiting in the local journal; the flag tells which one was used.
pub async fn load_child_progress(child_id: &str) -> (ChildProgress, bool) {
    match api::get_child_progress(child_id.to_string()).await {
        Ok(progress) => (progress, false),
        Err(e) => {
            tracing::warn!("Using local progress for {}: {}", child_id, e);
            let pending = make_journal_for_user(child_id).pending().await;
            let today = Local::now().date_naive();
            (
                progress::score(child_id, &pending, &catalog::exercises(), today),
                true,
            )
        }
    }
}

#[component]
pub fn ChildDashboard(user: UserInfo) -> Element {
    let sync = use_sync();
    let mut tab = use_signal(|| "Exercises".to_string());
    let child_id = user.id.clone();

    let mut progress = use_resource(move || {
        let child_id = child_id.clone();
        // Re-score after each upload
        let _ = sync().last_synced;
        async move { load_child_progress(&child_id).await }
    });

    let Some((stats, local_only)) = progress() else {
        return rsx! { p { class: "muted", "Loading..." } };
    };

    rsx! {
        div {
            class: "dashboard",
            div {
                class: "dashboard__welcome",
                Avatar { src: user.avatar_url(), alt: user.name.clone(), class: "avatar--lg avatar--ring" }
                div {
                    h1 { "Hi, {user.name}!" }
                    p { class: "muted", "Ready for today's practice?" }
                }
            }
            if local_only {
                Alert {
                    kind: AlertKind::Info,
                    message: "Showing progress saved on this device. Full history loads when you are back online.",
                }
            }
            div {
                class: "grid grid--3",
                StatCard { label: "Your Points", value: stats.points.to_string() }
                StatCard { label: "Badges Earned", value: stats.badges_earned().to_string() }
                StatCard {
                    label: "Weekly Progress",
                    value: format!("{}% ({})", stats.weekly.percent, weekly_badge(stats.weekly.days_practiced)),
                }
            }
            Tabs {
                tabs: vec!["Exercises", "Badges", "My Avatar"],
                active: tab(),
                onselect: move |t| tab.set(t),
            }
            match tab().as_str() {
                "Badges" => rsx! {
                    h2 { "Your Badges" }
                    div {
                        class: "grid grid--3",
                        for earned in stats.badges.iter().cloned() {
                            Card {
                                key: "{earned.badge.id}",
                                class: if earned.is_earned() { "badge-card" } else { "badge-card badge-card--locked" },
                                CardContent {
                                    div { class: "badge-card__image", "{earned.badge.image}" }
                                    h3 { "{earned.badge.name}" }
                                    p { class: "muted", "{earned.badge.description}" }
                                    if let Some(day) = earned.earned_on {
                                        p { class: "text-success", "Earned on {format_date(day)}" }
                                    } else {
                                        p { class: "text-warning", "Not yet earned" }
                                    }
                                }
                            }
                        }
                    }
                },
                "My Avatar" => rsx! {
                    h2 { "Customize Your Avatar" }
                    div {
                        class: "avatar-panel",
                        Avatar { src: user.avatar_url(), alt: "Your Avatar", class: "avatar--xl avatar--ring" }
                        p { class: "muted", "Earn more points to unlock special avatar items!" }
                    }
                },
                _ => rsx! {
                    h2 { "Your Exercises" }
                    ExerciseList {
                        exercises: stats.exercises.clone(),
                        on_finished: move |_| progress.restart(),
                    }
                },
            }
        }
    }
}

/// Summary card of one child, shared by the parent and therapist views.
#[component]
pub fn ChildOverview(child: UserInfo, stats: ChildProgress) -> Element {
    rsx! {
        Card {
            CardHeader { title: "Child Overview" }
            CardContent {
                div {
                    class: "row",
                    Avatar { src: child.avatar_url(), alt: child.name.clone(), class: "avatar--lg avatar--ring" }
                    div {
                        class: "grow",
                        h3 { "{child.name}" }
                        p { class: "muted", "Last practice: {crate::display::last_practice(stats.last_practiced)}" }
                    }
                    div {
                        class: "align-right",
                        span { class: "muted", "Weekly Progress" }
                        p {
                            class: "stat-card__value",
                            "{stats.weekly.percent}% "
                            span { class: "weekly-dot", "{weekly_badge(stats.weekly.days_practiced)}" }
                        }
                    }
                }
            }
        }
    }
}
