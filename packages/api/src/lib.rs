//! # API crate — shared fullstack server functions for the speech therapy companion
//!
//! Every screen of the app talks to the server through the functions defined
//! here, along with the modules they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | — | Argon2 password hashing, session sign-in and sign-out |
//! | [`config`] | `server` | Environment configuration (`DATABASE_URL`, session settings, `companion.toml`) |
//! | [`db`] | — | PostgreSQL pool and queries |
//! | [`error`] | `server` | [`ApiError`](error::ApiError) and its conversion to `ServerFnError` |
//! | [`models`] | — | [`Role`], [`UserInfo`], [`NewUser`] |
//! | [`permissions`] | — | Who may create, link and view whom |
//! | [`validate`] | — | Form checks shared with the UI |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, compiled
//! twice: once with the session extractor and a call into the server-side
//! handler (behind `#[cfg(feature = "server")]`) and once as a client stub
//! that forwards the call over HTTP.
//!
//! - **Authentication**: `get_current_user`, `login`, `logout`,
//!   `admin_signup_required`, `create_admin_user`, `change_password`
//! - **Accounts**: `create_user`, `assign_patient_to_parent`,
//!   `get_users_by_role`, `get_users_by_organization`, `get_my_children`,
//!   `get_my_patients`
//! - **Progress**: `record_progress`, `get_child_progress`

use dioxus::prelude::*;

pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod db;
#[cfg(feature = "server")]
pub mod error;
pub mod models;
pub mod permissions;
#[cfg(feature = "server")]
mod service;
pub mod validate;

pub use models::{NewUser, Role, UserInfo};
pub use practice::{ChildProgress, ProgressEntry};

#[cfg(feature = "server")]
use error::server_error;

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    service::current_user(&session).await.map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Sign in with a username, the role tab it was entered under, and a password.
#[cfg(feature = "server")]
#[post("/api/auth/login", session: tower_sessions::Session)]
pub async fn login(role: Role, username: String, password: String) -> Result<UserInfo, ServerFnError> {
    service::login(&session, role, &username, &password)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login(role: Role, username: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    service::logout(&session).await.map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// True until the first admin account exists.
#[cfg(feature = "server")]
#[get("/api/auth/admin-signup")]
pub async fn admin_signup_required() -> Result<bool, ServerFnError> {
    service::admin_signup_required().await.map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/admin-signup")]
pub async fn admin_signup_required() -> Result<bool, ServerFnError> {
    Ok(false)
}

/// Create the bootstrap admin. Works exactly once.
#[cfg(feature = "server")]
#[post("/api/auth/admin-signup")]
pub async fn create_admin_user(
    name: String,
    email: String,
    password: String,
) -> Result<UserInfo, ServerFnError> {
    service::create_admin_user(&name, &email, &password)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/admin-signup")]
pub async fn create_admin_user(
    name: String,
    email: String,
    password: String,
) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create a therapist, parent or child account. Returns the new user's id.
#[cfg(feature = "server")]
#[post("/api/users/create", session: tower_sessions::Session)]
pub async fn create_user(new_user: NewUser, password: String) -> Result<String, ServerFnError> {
    service::create_user(&session, &new_user, &password)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/users/create")]
pub async fn create_user(new_user: NewUser, password: String) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/users/assign", session: tower_sessions::Session)]
pub async fn assign_patient_to_parent(
    patient_id: String,
    parent_id: String,
) -> Result<(), ServerFnError> {
    service::assign_patient_to_parent(&session, &patient_id, &parent_id)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/users/assign")]
pub async fn assign_patient_to_parent(
    patient_id: String,
    parent_id: String,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/users/by-role", session: tower_sessions::Session)]
pub async fn get_users_by_role(role: Role) -> Result<Vec<UserInfo>, ServerFnError> {
    service::users_by_role(&session, role)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/users/by-role")]
pub async fn get_users_by_role(role: Role) -> Result<Vec<UserInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/users/by-organization", session: tower_sessions::Session)]
pub async fn get_users_by_organization(
    organization_id: String,
    role: Option<Role>,
) -> Result<Vec<UserInfo>, ServerFnError> {
    service::users_by_organization(&session, &organization_id, role)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/users/by-organization")]
pub async fn get_users_by_organization(
    organization_id: String,
    role: Option<Role>,
) -> Result<Vec<UserInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Change the signed-in user's own password.
#[cfg(feature = "server")]
#[post("/api/auth/change-password", session: tower_sessions::Session)]
pub async fn change_password(
    user_id: String,
    current_password: String,
    new_password: String,
) -> Result<(), ServerFnError> {
    service::change_password(&session, &user_id, &current_password, &new_password)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/change-password")]
pub async fn change_password(
    user_id: String,
    current_password: String,
    new_password: String,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Children assigned to the signed-in parent.
#[cfg(feature = "server")]
#[get("/api/users/children", session: tower_sessions::Session)]
pub async fn get_my_children() -> Result<Vec<UserInfo>, ServerFnError> {
    service::my_children(&session).await.map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/users/children")]
pub async fn get_my_children() -> Result<Vec<UserInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Children visible to the signed-in therapist (or every child for admins).
#[cfg(feature = "server")]
#[get("/api/users/patients", session: tower_sessions::Session)]
pub async fn get_my_patients() -> Result<Vec<UserInfo>, ServerFnError> {
    service::my_patients(&session).await.map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/users/patients")]
pub async fn get_my_patients() -> Result<Vec<UserInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Upload finished exercises. Returns how many were new; replays are ignored.
#[cfg(feature = "server")]
#[post("/api/progress/record", session: tower_sessions::Session)]
pub async fn record_progress(entries: Vec<ProgressEntry>) -> Result<usize, ServerFnError> {
    service::record_progress(&session, &entries)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/progress/record")]
pub async fn record_progress(entries: Vec<ProgressEntry>) -> Result<usize, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/progress/child", session: tower_sessions::Session)]
pub async fn get_child_progress(child_id: String) -> Result<ChildProgress, ServerFnError> {
    service::child_progress(&session, &child_id)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/progress/child")]
pub async fn get_child_progress(child_id: String) -> Result<ChildProgress, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
