//! # Form validation
//!
//! Shared by the UI (to fail fast without a round trip) and by the server
//! functions (which never trust the client). Each check returns the message
//! shown to the user; checks run in a fixed order so the first problem wins.

use crate::models::Role;

pub const MIN_PASSWORD_LEN: usize = 6;

pub type Check = Result<(), &'static str>;

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn login_form(username: &str, password: &str) -> Check {
    if blank(username) || password.is_empty() {
        return Err("Please enter both username and password");
    }
    Ok(())
}

pub fn admin_signup(name: &str, email: &str, password: &str, confirm: &str) -> Check {
    if blank(name) || blank(email) || password.is_empty() || confirm.is_empty() {
        return Err("All fields are required");
    }
    if !email.contains('@') {
        return Err("Please enter a valid email");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters");
    }
    if password != confirm {
        return Err("Passwords do not match");
    }
    Ok(())
}

pub fn new_user(name: &str, password: &str) -> Check {
    if blank(name) || password.is_empty() {
        return Err("All fields are required");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

pub fn change_password(current: &str, new: &str, confirm: &str) -> Check {
    if current.is_empty() || new.is_empty() || confirm.is_empty() {
        return Err("All fields are required");
    }
    if new != confirm {
        return Err("New passwords do not match");
    }
    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err("New password must be at least 6 characters");
    }
    Ok(())
}

pub fn assignment(parent_id: &str, patient_id: &str) -> Check {
    if parent_id.is_empty() || patient_id.is_empty() {
        return Err("Please select both a parent and a patient");
    }
    Ok(())
}

/// Login email generated for accounts created by staff:
/// `("Alex  Johnson", Child)` → `"alex.johnson.child@<domain>"`.
/// The role suffix keeps a parent and child sharing a name apart.
pub fn generated_email(name: &str, role: Role, domain: &str) -> String {
    let local = name
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(".");
    format!("{local}.{}@{domain}", role.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form() {
        assert!(login_form("alex", "secret").is_ok());
        assert_eq!(
            login_form("", "secret"),
            Err("Please enter both username and password")
        );
        assert_eq!(
            login_form("alex", ""),
            Err("Please enter both username and password")
        );
    }

    #[test]
    fn test_admin_signup_order() {
        assert_eq!(
            admin_signup("", "a@b.c", "123456", "123456"),
            Err("All fields are required")
        );
        assert_eq!(
            admin_signup("Ada", "nope", "123456", "123456"),
            Err("Please enter a valid email")
        );
        // Length is checked before equality
        assert_eq!(
            admin_signup("Ada", "a@b.c", "12345", "54321"),
            Err("Password must be at least 6 characters")
        );
        assert_eq!(
            admin_signup("Ada", "a@b.c", "123456", "1234567"),
            Err("Passwords do not match")
        );
        assert!(admin_signup("Ada", "a@b.c", "123456", "123456").is_ok());
    }

    #[test]
    fn test_change_password_order() {
        assert_eq!(change_password("", "a", "a"), Err("All fields are required"));
        // Mismatch is checked before length
        assert_eq!(
            change_password("old", "abc", "abd"),
            Err("New passwords do not match")
        );
        assert_eq!(
            change_password("old", "abc", "abc"),
            Err("New password must be at least 6 characters")
        );
        assert!(change_password("old", "abcdef", "abcdef").is_ok());
    }

    #[test]
    fn test_new_user() {
        assert_eq!(new_user("  ", "123456"), Err("All fields are required"));
        assert_eq!(
            new_user("Sam", "12345"),
            Err("Password must be at least 6 characters")
        );
        assert!(new_user("Sam", "123456").is_ok());
    }

    #[test]
    fn test_assignment() {
        assert!(assignment("p", "c").is_ok());
        assert_eq!(
            assignment("", "c"),
            Err("Please select both a parent and a patient")
        );
    }

    #[test]
    fn test_generated_email() {
        assert_eq!(
            generated_email("Alex  Johnson", Role::Child, "speechtherapy.example.com"),
            "alex.johnson.child@speechtherapy.example.com"
        );
        assert_eq!(generated_email("Sam", Role::Therapist, "x.org"), "sam.therapist@x.org");
    }

    #[test]
    fn test_generated_email_differs_by_role() {
        assert_ne!(
            generated_email("Sam Lee", Role::Parent, "x.org"),
            generated_email("Sam Lee", Role::Child, "x.org")
        );
    }
}
