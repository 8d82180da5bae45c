use api::{validate, NewUser, Role, UserInfo};
use dioxus::prelude::*;

use crate::components::{
    Alert, AlertKind, Avatar, Button, Card, CardContent, CardHeader, Input, Label, Select, Tabs,
};
use crate::display::role_badge_class;

const CREATABLE: [Role; 3] = [Role::Therapist, Role::Parent, Role::Child];

async fn users_of(role: Role) -> Vec<UserInfo> {
    match api::get_users_by_role(role).await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!("Failed to load {} accounts: {}", role, e);
            Vec::new()
        }
    }
}

/// Roles `actor` may create, in the order the forms list them.
pub(crate) fn creatable_by(actor: Role) -> Vec<Role> {
    CREATABLE
        .into_iter()
        .filter(|r| api::permissions::can_create(actor, *r))
        .collect()
}

fn options(users: &[UserInfo]) -> Vec<(String, String)> {
    users.iter().map(|u| (u.id.clone(), u.name.clone())).collect()
}

#[component]
pub fn AdminDashboard(user: UserInfo) -> Element {
    let mut tab = use_signal(|| "Users".to_string());

    rsx! {
        div {
            class: "dashboard",
            div {
                class: "dashboard__welcome",
                h1 { "Admin Dashboard" }
                p { class: "muted", "Signed in as {user.name}" }
            }
            Tabs {
                tabs: vec!["Users", "Create User", "Assign Patients"],
                active: tab(),
                onselect: move |t| tab.set(t),
            }
            match tab().as_str() {
                "Create User" => rsx! {
                    CreateUserForm {
                        roles: creatable_by(Role::Admin),
                        organization_id: user.organization_id.clone().unwrap_or_default(),
                        choose_organization: true,
                    }
                },
                "Assign Patients" => rsx! { AssignPatientForm {} },
                _ => rsx! { UsersTab {} },
            }
        }
    }
}

/// Mounted each time the tab is selected, so the lists are always fresh.
#[component]
fn UsersTab() -> Element {
    let lists = use_resource(|| async move {
        let mut lists = Vec::with_capacity(CREATABLE.len());
        for role in CREATABLE {
            lists.push((role, users_of(role).await));
        }
        lists
    });

    let Some(lists) = lists() else {
        return rsx! { p { class: "muted", "Loading..." } };
    };

    rsx! {
        div {
            class: "grid grid--3",
            for (role, users) in lists {
                Card {
                    key: "{role}",
                    CardHeader { title: format!("{}s", role.label()), description: format!("{} accounts", users.len()) }
                    CardContent {
                        if users.is_empty() {
                            p { class: "muted small", "No {role} accounts yet." }
                        }
                        for u in users {
                            div {
                                key: "{u.id}",
                                class: "row",
                                Avatar { src: u.avatar_url(), alt: u.name.clone(), class: "avatar--xs" }
                                span { class: "grow", "{u.name}" }
                                span { class: role_badge_class(u.role), "{u.role.label()}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Account creation for staff. Only admins pick the organization; other
/// staff place accounts in their own.
#[component]
pub(crate) fn CreateUserForm(
    roles: Vec<Role>,
    organization_id: String,
    #[props(default)] choose_organization: bool,
    on_created: Option<EventHandler<()>>,
) -> Element {
    let mut name = use_signal(String::new);
    let mut role = use_signal(|| Role::Child);
    let mut organization = use_signal(move || organization_id);
    let mut password = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);

    let description = format!(
        "Add a {} account",
        roles
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(" or ")
    );
    let role_options: Vec<(String, String)> = roles
        .iter()
        .map(|r| (r.as_str().to_string(), r.label().to_string()))
        .collect();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        error.set(None);
        success.set(None);
        if let Err(msg) = validate::new_user(&name(), &password()) {
            error.set(Some(msg.to_string()));
            return;
        }
        let new_user = NewUser {
            name: name().trim().to_string(),
            role: role(),
            organization_id: Some(organization()).filter(|o| !o.trim().is_empty()),
            avatar: None,
        };
        loading.set(true);
        spawn(async move {
            match api::create_user(new_user.clone(), password()).await {
                Ok(_) => {
                    success.set(Some(format!("User {} created successfully", new_user.name)));
                    name.set(String::new());
                    password.set(String::new());
                    if let Some(handler) = on_created {
                        handler.call(());
                    }
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        Card {
            CardHeader { title: "Create New User", description }
            CardContent {
                form {
                    class: "form",
                    onsubmit: handle_submit,
                    if let Some(msg) = error() {
                        Alert { kind: AlertKind::Error, message: msg }
                    }
                    if let Some(msg) = success() {
                        Alert { kind: AlertKind::Success, message: msg }
                    }
                    Label { html_for: "new-name", "Name" }
                    Input {
                        id: "new-name",
                        placeholder: "Full name",
                        value: name(),
                        disabled: loading(),
                        oninput: move |evt: FormEvent| name.set(evt.value()),
                    }
                    Label { html_for: "new-role", "Role" }
                    Select {
                        id: "new-role",
                        options: role_options,
                        value: role().as_str().to_string(),
                        onchange: move |value: String| {
                            if let Ok(r) = value.parse::<Role>() {
                                role.set(r);
                            }
                        },
                    }
                    if choose_organization {
                        Label { html_for: "new-org", "Organization" }
                        Input {
                            id: "new-org",
                            placeholder: "Organization ID",
                            value: organization(),
                            disabled: loading(),
                            oninput: move |evt: FormEvent| organization.set(evt.value()),
                        }
                    }
                    Label { html_for: "new-password", "Password" }
                    Input {
                        id: "new-password",
                        input_type: "password",
                        placeholder: "At least 6 characters",
                        value: password(),
                        disabled: loading(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                    Button {
                        submit: true,
                        disabled: loading(),
                        if loading() { "Creating..." } else { "Create User" }
                    }
                }
            }
        }
    }
}

#[component]
pub(crate) fn AssignPatientForm() -> Element {
    let mut patient_id = use_signal(String::new);
    let mut parent_id = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);

    let accounts = use_resource(|| async move { (users_of(Role::Child).await, users_of(Role::Parent).await) });

    let Some((children, parents)) = accounts() else {
        return rsx! { p { class: "muted", "Loading..." } };
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        error.set(None);
        success.set(None);
        if let Err(msg) = validate::assignment(&parent_id(), &patient_id()) {
            error.set(Some(msg.to_string()));
            return;
        }
        loading.set(true);
        spawn(async move {
            match api::assign_patient_to_parent(patient_id(), parent_id()).await {
                Ok(()) => {
                    success.set(Some("Patient assigned to parent successfully".to_string()));
                    patient_id.set(String::new());
                    parent_id.set(String::new());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        Card {
            CardHeader { title: "Assign Patient to Parent", description: "Link a child account to a parent account" }
            CardContent {
                form {
                    class: "form",
                    onsubmit: handle_submit,
                    if let Some(msg) = error() {
                        Alert { kind: AlertKind::Error, message: msg }
                    }
                    if let Some(msg) = success() {
                        Alert { kind: AlertKind::Success, message: msg }
                    }
                    Label { html_for: "assign-patient", "Patient" }
                    Select {
                        id: "assign-patient",
                        options: options(&children),
                        value: patient_id(),
                        placeholder: "Select a patient",
                        onchange: move |value| patient_id.set(value),
                    }
                    Label { html_for: "assign-parent", "Parent" }
                    Select {
                        id: "assign-parent",
                        options: options(&parents),
                        value: parent_id(),
                        placeholder: "Select a parent",
                        onchange: move |value| parent_id.set(value),
                    }
                    Button {
                        submit: true,
                        disabled: loading(),
                        if loading() { "Assigning..." } else { "Assign Patient" }
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
    fn test_admins_cannot_create_admins() {
        assert!(!CREATABLE.contains(&Role::Admin));
        assert!(CREATABLE
            .iter()
            .all(|r| api::permissions::can_create(Role::Admin, *r)));
    }

    #[test]
    fn test_creatable_roles_per_actor() {
        assert_eq!(creatable_by(Role::Admin), CREATABLE.to_vec());
        assert_eq!(creatable_by(Role::Therapist), vec![Role::Parent, Role::Child]);
        assert!(creatable_by(Role::Parent).is_empty());
        assert!(creatable_by(Role::Child).is_empty());
    }

    #[test]
    fn test_select_options() {
        let users = vec![UserInfo {
            id: "p-1".to_string(),
            name: "Pat".to_string(),
            role: Role::Parent,
            avatar: None,
            organization_id: None,
            created_by: None,
        }];
        assert_eq!(options(&users), vec![("p-1".to_string(), "Pat".to_string())]);
    }
}
