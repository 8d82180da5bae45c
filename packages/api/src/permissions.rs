//! # Role rules
//!
//! Who may create which accounts, who may link a child to a parent, and who
//! may look at a child's progress. Pure functions over roles and ids, so the
//! server functions stay a sequence of lookups plus one call here.

use crate::models::Role;

/// Only admins create therapists; admins and therapists create parents and
/// children. Admin accounts only come from the bootstrap signup.
pub fn can_create(actor: Role, target: Role) -> bool {
    match target {
        Role::Therapist => actor == Role::Admin,
        Role::Parent | Role::Child => matches!(actor, Role::Admin | Role::Therapist),
        Role::Admin => false,
    }
}

/// Organization of a new account. Admins may pick one (falling back to
/// their own); everybody else places accounts in their own organization.
pub fn assigned_organization(
    actor: Role,
    actor_org: Option<&str>,
    requested: Option<&str>,
) -> Option<String> {
    let requested = requested.map(str::trim).filter(|s| !s.is_empty());
    match (actor, requested) {
        (Role::Admin, Some(org)) => Some(org.to_string()),
        _ => actor_org.map(str::to_string),
    }
}

/// Admins may link any child to any parent; other staff only when they
/// created one of the two accounts.
pub fn can_assign(
    actor_id: &str,
    actor: Role,
    patient_created_by: Option<&str>,
    parent_created_by: Option<&str>,
) -> bool {
    actor == Role::Admin
        || patient_created_by == Some(actor_id)
        || parent_created_by == Some(actor_id)
}

/// How the viewer relates to the child whose progress is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChildRelation {
    pub is_assigned_parent: bool,
    pub same_organization: bool,
    pub created_child: bool,
}

pub fn can_view_child(actor_id: &str, actor: Role, child_id: &str, relation: ChildRelation) -> bool {
    match actor {
        Role::Admin => true,
        Role::Child => actor_id == child_id,
        Role::Parent => relation.is_assigned_parent,
        Role::Therapist => relation.same_organization || relation.created_child,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_create() {
        assert!(can_create(Role::Admin, Role::Therapist));
        assert!(can_create(Role::Admin, Role::Parent));
        assert!(can_create(Role::Admin, Role::Child));
        assert!(!can_create(Role::Admin, Role::Admin));

        assert!(!can_create(Role::Therapist, Role::Therapist));
        assert!(can_create(Role::Therapist, Role::Parent));
        assert!(can_create(Role::Therapist, Role::Child));

        for target in Role::ALL {
            assert!(!can_create(Role::Parent, target));
            assert!(!can_create(Role::Child, target));
        }
    }

    #[test]
    fn test_assigned_organization() {
        assert_eq!(
            assigned_organization(Role::Admin, Some("org-1"), Some("org-2")),
            Some("org-2".to_string())
        );
        assert_eq!(
            assigned_organization(Role::Admin, Some("org-1"), Some("  ")),
            Some("org-1".to_string())
        );
        assert_eq!(
            assigned_organization(Role::Therapist, Some("org-1"), Some("org-2")),
            Some("org-1".to_string())
        );
        assert_eq!(assigned_organization(Role::Therapist, None, Some("org-2")), None);
    }

    #[test]
    fn test_can_assign() {
        assert!(can_assign("a", Role::Admin, None, None));
        assert!(can_assign("t", Role::Therapist, Some("t"), Some("other")));
        assert!(can_assign("t", Role::Therapist, Some("other"), Some("t")));
        assert!(!can_assign("t", Role::Therapist, Some("other"), None));
    }

    #[test]
    fn test_can_view_child() {
        let none = ChildRelation::default();
        assert!(can_view_child("a", Role::Admin, "c", none));
        assert!(can_view_child("c", Role::Child, "c", none));
        assert!(!can_view_child("c2", Role::Child, "c", none));
        assert!(!can_view_child("p", Role::Parent, "c", none));
        assert!(can_view_child(
            "p",
            Role::Parent,
            "c",
            ChildRelation { is_assigned_parent: true, ..none }
        ));
        assert!(can_view_child(
            "t",
            Role::Therapist,
            "c",
            ChildRelation { same_organization: true, ..none }
        ));
        assert!(!can_view_child("t", Role::Therapist, "c", none));
    }
}
