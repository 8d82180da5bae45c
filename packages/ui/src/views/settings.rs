use api::{validate, UserInfo};
use dioxus::prelude::*;

use crate::components::{Alert, AlertKind, Avatar, Button, Card, CardContent, CardHeader, Input, Label, Tabs};
use crate::display::{role_badge_class, shows_password_form};
use crate::journal::{load_notification_prefs, save_notification_prefs, NotificationPrefs};
use crate::use_auth;

/// Profile, password and notification settings of the signed-in user.
#[component]
pub fn SettingsView() -> Element {
    let auth = use_auth();
    let mut tab = use_signal(|| "Profile".to_string());

    let Some(user) = auth().user else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "dashboard settings",
            h1 { "Settings" }
            Tabs {
                tabs: vec!["Profile", "Security", "Notifications"],
                active: tab(),
                onselect: move |t| tab.set(t),
            }
            match tab().as_str() {
                "Security" => rsx! {
                    if shows_password_form(user.role) {
                        ChangePasswordForm { user_id: user.id.clone(), online: auth().online }
                    } else {
                        Card {
                            CardContent {
                                p { class: "muted", "Ask your parent or therapist if you need a new password." }
                            }
                        }
                    }
                },
                "Notifications" => rsx! { NotificationSettings { user_id: user.id.clone() } },
                _ => rsx! { ProfileCard { user } },
            }
        }
    }
}

#[component]
fn ProfileCard(user: UserInfo) -> Element {
    rsx! {
        Card {
            CardHeader { title: "Profile", description: "Your account details" }
            CardContent {
                div {
                    class: "row",
                    Avatar { src: user.avatar_url(), alt: user.name.clone(), class: "avatar--lg" }
                    div {
                        h3 { "{user.name}" }
                        span { class: role_badge_class(user.role), "{user.role.label()}" }
                    }
                }
                if let Some(org) = user.organization_id {
                    p { class: "muted small", "Organization: {org}" }
                }
            }
        }
    }
}

#[component]
fn ChangePasswordForm(user_id: String, online: bool) -> Element {
    let mut current = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        error.set(None);
        success.set(false);
        if let Err(msg) = validate::change_password(&current(), &new_password(), &confirm()) {
            error.set(Some(msg.to_string()));
            return;
        }
        let user_id = user_id.clone();
        loading.set(true);
        spawn(async move {
            match api::change_password(user_id, current(), new_password()).await {
                Ok(()) => {
                    success.set(true);
                    current.set(String::new());
                    new_password.set(String::new());
                    confirm.set(String::new());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        Card {
            CardHeader { title: "Change Password" }
            CardContent {
                form {
                    class: "form",
                    onsubmit: handle_submit,
                    if let Some(msg) = error() {
                        Alert { kind: AlertKind::Error, message: msg }
                    }
                    if success() {
                        Alert { kind: AlertKind::Success, message: "Password changed successfully" }
                    }
                    if !online {
                        Alert { kind: AlertKind::Info, message: "You need to be online to change your password." }
                    }
                    Label { html_for: "current-password", "Current Password" }
                    Input {
                        id: "current-password",
                        input_type: "password",
                        value: current(),
                        oninput: move |evt: FormEvent| current.set(evt.value()),
                    }
                    Label { html_for: "new-password", "New Password" }
                    Input {
                        id: "new-password",
                        input_type: "password",
                        value: new_password(),
                        oninput: move |evt: FormEvent| new_password.set(evt.value()),
                    }
                    Label { html_for: "confirm-password", "Confirm New Password" }
                    Input {
                        id: "confirm-password",
                        input_type: "password",
                        value: confirm(),
                        oninput: move |evt: FormEvent| confirm.set(evt.value()),
                    }
                    Button {
                        submit: true,
                        disabled: loading() || !online,
                        if loading() { "Changing..." } else { "Change Password" }
                    }
                }
            }
        }
    }
}

#[component]
fn NotificationSettings(user_id: String) -> Element {
    let mut prefs = use_signal(NotificationPrefs::default);
    let mut saved = use_signal(|| false);

    let load_id = user_id.clone();
    let _loader = use_resource(move || {
        let user_id = load_id.clone();
        async move { prefs.set(load_notification_prefs(&user_id).await) }
    });

    let handle_save = move |_| {
        let user_id = user_id.clone();
        spawn(async move {
            saved.set(save_notification_prefs(&user_id, prefs()).await);
        });
    };

    rsx! {
        Card {
            CardHeader { title: "Notifications", description: "Stored on this device" }
            CardContent {
                label {
                    class: "toggle",
                    input {
                        r#type: "checkbox",
                        checked: prefs().practice_reminders,
                        onchange: move |evt: FormEvent| {
                            saved.set(false);
                            prefs.with_mut(|p| p.practice_reminders = evt.checked());
                        },
                    }
                    "Practice reminders"
                }
                label {
                    class: "toggle",
                    input {
                        r#type: "checkbox",
                        checked: prefs().progress_reports,
                        onchange: move |evt: FormEvent| {
                            saved.set(false);
                            prefs.with_mut(|p| p.progress_reports = evt.checked());
                        },
                    }
                    "Weekly progress reports"
                }
                div {
                    class: "row",
                    Button { onclick: handle_save, "Save Preferences" }
                    if saved() {
                        span { class: "text-success", "Saved" }
                    }
                }
            }
        }
    }
}
