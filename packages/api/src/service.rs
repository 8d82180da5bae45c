//! Server-side bodies of the server functions in `lib.rs`.
//!
//! Each handler takes the request's session, does its lookups, asks
//! [`permissions`](crate::permissions) and returns an [`ApiError`] the
//! boundary converts for the client.

use chrono::Utc;
use practice::{catalog, progress, ChildProgress, ProgressEntry};
use tower_sessions::Session;
use uuid::Uuid;

use crate::auth;
use crate::config::server_config;
use crate::db::{self, get_pool, settings, users};
use crate::error::ApiError;
use crate::models::{avatar_for, NewUser, Role, User, UserInfo};
use crate::permissions::{self, ChildRelation};
use crate::validate;

fn parse_id(id: &str, what: &'static str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id.trim()).map_err(|_| ApiError::NotFound(what))
}

fn infos(users: Vec<User>) -> Vec<UserInfo> {
    users.iter().map(User::to_info).collect()
}

pub async fn current_user(session: &Session) -> Result<Option<UserInfo>, ApiError> {
    let pool = get_pool().await?;
    let user = auth::current_user(session, pool).await?;
    Ok(user.map(|u| u.to_info()))
}

pub async fn login(
    session: &Session,
    role: Role,
    username: &str,
    password: &str,
) -> Result<UserInfo, ApiError> {
    validate::login_form(username, password).map_err(ApiError::Validation)?;
    let pool = get_pool().await?;

    let Some(user) = users::find_by_name_and_role(pool, username, role).await? else {
        return Err(ApiError::InvalidCredentials);
    };
    let Some(hash) = users::password_hash(pool, user.id).await? else {
        return Err(ApiError::InvalidCredentials);
    };
    if !auth::verify_password(password, &hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    auth::sign_in(session, &user).await?;
    tracing::info!("{} signed in as {}", user.id, user.role);
    Ok(user.to_info())
}

pub async fn logout(session: &Session) -> Result<(), ApiError> {
    auth::sign_out(session).await
}

pub async fn admin_signup_required() -> Result<bool, ApiError> {
    let pool = get_pool().await?;
    let completed = settings::flag(pool, settings::ADMIN_SIGNUP_COMPLETED).await?;
    Ok(!completed)
}

/// The new admin signs in afterwards through the normal login form.
pub async fn create_admin_user(
    name: &str,
    email: &str,
    password: &str,
) -> Result<UserInfo, ApiError> {
    validate::admin_signup(name, email, password, password).map_err(ApiError::Validation)?;
    let config = server_config()?;
    let pool = get_pool().await?;
    let password_hash = auth::hash_password(password)?;
    let avatar = avatar_for(name.trim());

    let mut tx = pool.begin().await?;
    if settings::flag_for_update(&mut *tx, settings::ADMIN_SIGNUP_COMPLETED).await? {
        return Err(ApiError::AdminSignupClosed);
    }
    let user = users::insert(
        &mut *tx,
        &users::NewAccount {
            name,
            role: Role::Admin,
            avatar: Some(avatar.as_str()),
            organization_id: Some(config.companion.organization.default_id.as_str()),
            created_by: None,
        },
    )
    .await?;
    users::insert_credentials(&mut *tx, user.id, &email.trim().to_lowercase(), &password_hash)
        .await?;
    settings::set_flag(&mut *tx, settings::ADMIN_SIGNUP_COMPLETED, true).await?;
    tx.commit().await?;

    tracing::info!("Admin account {} created, signup closed", user.id);
    Ok(user.to_info())
}

pub async fn create_user(
    session: &Session,
    new_user: &NewUser,
    password: &str,
) -> Result<String, ApiError> {
    validate::new_user(&new_user.name, password).map_err(ApiError::Validation)?;
    let config = server_config()?;
    let pool = get_pool().await?;
    let actor = auth::require_user(session, pool).await?;

    if !permissions::can_create(actor.role, new_user.role) {
        return Err(ApiError::Forbidden);
    }

    let organization_id = permissions::assigned_organization(
        actor.role,
        actor.organization_id.as_deref(),
        new_user.organization_id.as_deref(),
    );
    let avatar = new_user
        .avatar
        .clone()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| avatar_for(new_user.name.trim()));
    let email = validate::generated_email(
        &new_user.name,
        new_user.role,
        &config.companion.organization.email_domain,
    );
    let password_hash = auth::hash_password(password)?;

    let mut tx = pool.begin().await?;
    let user = users::insert(
        &mut *tx,
        &users::NewAccount {
            name: &new_user.name,
            role: new_user.role,
            avatar: Some(avatar.as_str()),
            organization_id: organization_id.as_deref(),
            created_by: Some(actor.id),
        },
    )
    .await?;
    users::insert_credentials(&mut *tx, user.id, &email, &password_hash).await?;
    tx.commit().await?;

    tracing::info!("{} created {} account {}", actor.id, user.role, user.id);
    Ok(user.id.to_string())
}

pub async fn assign_patient_to_parent(
    session: &Session,
    patient_id: &str,
    parent_id: &str,
) -> Result<(), ApiError> {
    validate::assignment(parent_id, patient_id).map_err(ApiError::Validation)?;
    let pool = get_pool().await?;
    let actor = auth::require_user(session, pool).await?;

    let patient = users::find_by_id(pool, parse_id(patient_id, "Patient")?)
        .await?
        .filter(|u| u.role == Role::Child)
        .ok_or(ApiError::NotFound("Patient"))?;
    let parent = users::find_by_id(pool, parse_id(parent_id, "Parent")?)
        .await?
        .filter(|u| u.role == Role::Parent)
        .ok_or(ApiError::NotFound("Parent"))?;

    let actor_id = actor.id.to_string();
    let patient_creator = patient.created_by.map(|id| id.to_string());
    let parent_creator = parent.created_by.map(|id| id.to_string());
    if !permissions::can_assign(
        &actor_id,
        actor.role,
        patient_creator.as_deref(),
        parent_creator.as_deref(),
    ) {
        return Err(ApiError::Forbidden);
    }

    users::link_parent_child(pool, parent.id, patient.id).await?;
    tracing::info!("{} linked child {} to parent {}", actor.id, patient.id, parent.id);
    Ok(())
}

pub async fn users_by_role(session: &Session, role: Role) -> Result<Vec<UserInfo>, ApiError> {
    let pool = get_pool().await?;
    auth::require_user(session, pool).await?;
    Ok(infos(users::list_by_role(pool, role).await?))
}

pub async fn users_by_organization(
    session: &Session,
    organization_id: &str,
    role: Option<Role>,
) -> Result<Vec<UserInfo>, ApiError> {
    let pool = get_pool().await?;
    auth::require_user(session, pool).await?;
    Ok(infos(
        users::list_by_organization(pool, organization_id.trim(), role).await?,
    ))
}

pub async fn change_password(
    session: &Session,
    user_id: &str,
    current_password: &str,
    new_password: &str,
) -> Result<(), ApiError> {
    validate::change_password(current_password, new_password, new_password)
        .map_err(ApiError::Validation)?;
    let pool = get_pool().await?;
    let actor = auth::require_user(session, pool).await?;
    if parse_id(user_id, "User")? != actor.id {
        return Err(ApiError::Forbidden);
    }

    let hash = users::password_hash(pool, actor.id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    if !auth::verify_password(current_password, &hash)? {
        return Err(ApiError::WrongPassword);
    }

    let new_hash = auth::hash_password(new_password)?;
    if !users::update_password_hash(pool, actor.id, &new_hash).await? {
        return Err(ApiError::NotFound("User"));
    }
    tracing::info!("{} changed their password", actor.id);
    Ok(())
}

pub async fn my_children(session: &Session) -> Result<Vec<UserInfo>, ApiError> {
    let pool = get_pool().await?;
    let actor = auth::require_user(session, pool).await?;
    if actor.role != Role::Parent {
        return Err(ApiError::Forbidden);
    }
    Ok(infos(users::children_of(pool, actor.id).await?))
}

pub async fn my_patients(session: &Session) -> Result<Vec<UserInfo>, ApiError> {
    let pool = get_pool().await?;
    let actor = auth::require_user(session, pool).await?;
    let patients = match actor.role {
        Role::Admin => users::list_by_role(pool, Role::Child).await?,
        Role::Therapist => {
            users::patients_of(pool, actor.id, actor.organization_id.as_deref()).await?
        }
        _ => return Err(ApiError::Forbidden),
    };
    Ok(infos(patients))
}

/// Entries that do not belong to the signed-in child, name an unknown
/// exercise or report step counts that don't fit it are skipped.
fn acceptable(entry: &ProgressEntry, child_id: Uuid) -> bool {
    let owner_matches = Uuid::parse_str(&entry.child_id).is_ok_and(|id| id == child_id);
    // Bounded by the catalog, so the counts always fit the integer columns
    owner_matches
        && catalog::exercise(&entry.exercise_id)
            .is_some_and(|e| entry.total_steps as usize == e.steps.len())
        && entry.correct_steps <= entry.total_steps
}

pub async fn record_progress(
    session: &Session,
    entries: &[ProgressEntry],
) -> Result<usize, ApiError> {
    let pool = get_pool().await?;
    let child = auth::require_user(session, pool).await?;
    if child.role != Role::Child {
        return Err(ApiError::Forbidden);
    }

    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    for entry in entries {
        if !acceptable(entry, child.id) {
            tracing::warn!("Skipping progress entry {} from {}", entry.id, child.id);
            continue;
        }
        if db::progress::insert_completion(&mut *tx, child.id, entry).await? {
            inserted += 1;
        }
    }
    tx.commit().await?;

    tracing::debug!(
        "Recorded {} of {} progress entries for {}",
        inserted,
        entries.len(),
        child.id
    );
    Ok(inserted)
}

pub async fn child_progress(session: &Session, child_id: &str) -> Result<ChildProgress, ApiError> {
    let pool = get_pool().await?;
    let actor = auth::require_user(session, pool).await?;
    let child = users::find_by_id(pool, parse_id(child_id, "Child")?)
        .await?
        .filter(|u| u.role == Role::Child)
        .ok_or(ApiError::NotFound("Child"))?;

    let relation = ChildRelation {
        is_assigned_parent: actor.role == Role::Parent
            && users::is_parent_of(pool, actor.id, child.id).await?,
        same_organization: actor.organization_id.is_some()
            && actor.organization_id == child.organization_id,
        created_child: child.created_by == Some(actor.id),
    };
    let actor_id = actor.id.to_string();
    let child_key = child.id.to_string();
    if !permissions::can_view_child(&actor_id, actor.role, &child_key, relation) {
        return Err(ApiError::Forbidden);
    }

    let entries = db::progress::completions_for(pool, child.id).await?;
    Ok(progress::score(
        &child_key,
        &entries,
        &catalog::exercises(),
        Utc::now().date_naive(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(child_id: &str, exercise_id: &str, correct: u32, total: u32) -> ProgressEntry {
        ProgressEntry {
            id: Uuid::new_v4(),
            child_id: child_id.to_string(),
            exercise_id: exercise_id.to_string(),
            correct_steps: correct,
            total_steps: total,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_acceptable_entries() {
        let child = Uuid::new_v4();
        let me = child.to_string();
        assert!(acceptable(&entry(&me, "s-sound", 4, 5), child));
        assert!(!acceptable(&entry(&Uuid::new_v4().to_string(), "s-sound", 4, 5), child));
        assert!(!acceptable(&entry("not-a-uuid", "s-sound", 4, 5), child));
        assert!(!acceptable(&entry(&me, "whistling", 4, 5), child));
        assert!(!acceptable(&entry(&me, "s-sound", 6, 5), child));
    }

    #[test]
    fn test_rejects_step_counts_not_matching_exercise() {
        let child = Uuid::new_v4();
        let me = child.to_string();
        assert!(acceptable(&entry(&me, "s-sound", 0, 5), child));
        assert!(!acceptable(&entry(&me, "s-sound", 3, 4), child));
        assert!(!acceptable(&entry(&me, "s-sound", 5, u32::MAX), child));
        assert!(!acceptable(&entry(&me, "s-sound", u32::MAX, u32::MAX), child));
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&format!(" {id} "), "User").unwrap(), id);
        assert!(matches!(parse_id("", "Patient"), Err(ApiError::NotFound("Patient"))));
    }
}
