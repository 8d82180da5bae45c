//! Sign-in screen with role tabs, and the one-time admin setup form.

use api::{validate, Role};
use dioxus::prelude::*;

use crate::components::{Alert, AlertKind, Button, ButtonVariant, Card, CardContent, CardHeader, Input, Label, Tabs};
use crate::display::can_sign_in;
use crate::{journal, use_auth, AuthState};

/// Shows the admin setup form until the first admin exists, then the
/// sign-in form. `on_signed_in` runs after a successful sign-in.
#[component]
pub fn LoginView(on_signed_in: EventHandler<()>) -> Element {
    let auth = use_auth();
    let mut signup_required = use_signal(|| false);
    let mut notice = use_signal(|| Option::<String>::None);

    let _check = use_resource(move || async move {
        if !auth().online {
            return;
        }
        match api::admin_signup_required().await {
            Ok(required) => signup_required.set(required),
            Err(e) => tracing::error!("Error checking admin signup status: {}", e),
        }
    });

    rsx! {
        div {
            class: "login-page",
            if signup_required() {
                AdminSignupForm {
                    on_created: move |_| {
                        notice.set(Some("Admin account created successfully! You can now log in.".to_string()));
                        signup_required.set(false);
                    },
                }
            } else {
                SignInForm { notice: notice(), on_signed_in }
            }
        }
    }
}

/// Outcome of pressing submit on a form.
#[derive(Debug, PartialEq)]
enum Gate {
    /// A submission is already in flight.
    Busy,
    Invalid(&'static str),
    Go,
}

fn submit_gate(in_flight: bool, check: validate::Check) -> Gate {
    if in_flight {
        return Gate::Busy;
    }
    match check {
        Ok(()) => Gate::Go,
        Err(msg) => Gate::Invalid(msg),
    }
}

fn role_from_tab(tab: &str) -> Role {
    Role::ALL
        .into_iter()
        .find(|r| r.label() == tab)
        .unwrap_or(Role::Child)
}

#[component]
fn SignInForm(notice: Option<String>, on_signed_in: EventHandler<()>) -> Element {
    let mut auth = use_auth();
    let mut role = use_signal(|| Role::Child);
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let online = auth().online;
    let enabled = can_sign_in(loading(), online, role());

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        match submit_gate(loading(), validate::login_form(&username(), &password())) {
            Gate::Busy => return,
            Gate::Invalid(msg) => {
                error.set(Some(msg.to_string()));
                return;
            }
            Gate::Go => {
                error.set(None);
                loading.set(true);
            }
        }
        spawn(async move {
            if !auth().online {
                // Offline: only the child remembered on this device
                match journal::offline_sign_in(&username()).await {
                    Some(user) => {
                        auth.set(AuthState {
                            user: Some(user),
                            loading: false,
                            online: false,
                        });
                        on_signed_in.call(());
                    }
                    None => error.set(Some("Invalid credentials".to_string())),
                }
                loading.set(false);
                return;
            }

            match api::login(role(), username(), password()).await {
                Ok(user) => {
                    // A fresh session supersedes any logout still owed to the server
                    journal::clear_logout_pending().await;
                    journal::remember_user(&user).await;
                    auth.set(AuthState {
                        user: Some(user),
                        loading: false,
                        online: true,
                    });
                    on_signed_in.call(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        Card {
            class: "login-card",
            CardHeader {
                title: "Speech Therapy Companion",
                description: "Sign in to continue",
            }
            CardContent {
                Tabs {
                    tabs: Role::ALL.iter().map(|r| r.label()).collect::<Vec<_>>(),
                    active: role().label().to_string(),
                    onselect: move |tab: String| {
                        role.set(role_from_tab(&tab));
                        username.set(String::new());
                        password.set(String::new());
                        error.set(None);
                    },
                }
                form {
                    class: "form",
                    onsubmit: handle_login,
                    if let Some(err) = error() {
                        Alert { kind: AlertKind::Error, message: err }
                    } else if let Some(msg) = notice.clone() {
                        Alert { kind: AlertKind::Success, message: msg }
                    }
                    div {
                        class: "form__field",
                        Label { html_for: "username", "Username" }
                        Input {
                            id: "username",
                            placeholder: "Enter your username",
                            value: username(),
                            oninput: move |evt: FormEvent| username.set(evt.value()),
                        }
                    }
                    div {
                        class: "form__field",
                        Label { html_for: "password", "Password" }
                        Input {
                            id: "password",
                            input_type: "password",
                            placeholder: "Enter your password",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        class: "w-full",
                        submit: true,
                        disabled: !enabled,
                        if loading() { "Signing in..." } else { "Sign In" }
                    }
                    if !online {
                        Alert {
                            kind: AlertKind::Info,
                            message: "You are currently offline. Only child accounts can login in offline mode.",
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AdminSignupForm(on_created: EventHandler<()>) -> Element {
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        let check = validate::admin_signup(&name(), &email(), &password(), &confirm());
        match submit_gate(loading(), check) {
            Gate::Busy => return,
            Gate::Invalid(msg) => {
                error.set(Some(msg.to_string()));
                return;
            }
            Gate::Go => {
                error.set(None);
                loading.set(true);
            }
        }
        spawn(async move {
            match api::create_admin_user(name(), email(), password()).await {
                Ok(admin) => {
                    tracing::info!("Admin account {} created", admin.id);
                    on_created.call(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        Card {
            class: "login-card",
            CardHeader {
                title: "Admin Account Setup",
                description: "Create the first administrator account to get started",
            }
            CardContent {
                form {
                    class: "form",
                    onsubmit: handle_signup,
                    if let Some(err) = error() {
                        Alert { kind: AlertKind::Error, message: err }
                    }
                    div {
                        class: "form__field",
                        Label { html_for: "admin-name", "Name" }
                        Input {
                            id: "admin-name",
                            placeholder: "Enter your name",
                            value: name(),
                            oninput: move |evt: FormEvent| name.set(evt.value()),
                        }
                    }
                    div {
                        class: "form__field",
                        Label { html_for: "admin-email", "Email" }
                        Input {
                            id: "admin-email",
                            input_type: "email",
                            placeholder: "Enter your email",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                    div {
                        class: "form__field",
                        Label { html_for: "admin-password", "Password" }
                        Input {
                            id: "admin-password",
                            input_type: "password",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }
                    div {
                        class: "form__field",
                        Label { html_for: "admin-confirm", "Confirm Password" }
                        Input {
                            id: "admin-confirm",
                            input_type: "password",
                            value: confirm(),
                            oninput: move |evt: FormEvent| confirm.set(evt.value()),
                        }
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        class: "w-full",
                        submit: true,
                        disabled: loading(),
                        if loading() { "Creating Account..." } else { "Create Admin Account" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_tab() {
        assert_eq!(role_from_tab("Therapist"), Role::Therapist);
        assert_eq!(role_from_tab("Admin"), Role::Admin);
        assert_eq!(role_from_tab("unknown"), Role::Child);
    }

    #[test]
    fn test_second_submit_is_ignored_while_in_flight() {
        assert_eq!(submit_gate(false, validate::login_form("alex", "pw")), Gate::Go);
        assert_eq!(submit_gate(true, validate::login_form("alex", "pw")), Gate::Busy);
        assert_eq!(
            submit_gate(false, validate::login_form("", "pw")),
            Gate::Invalid("Please enter both username and password")
        );
    }
}
