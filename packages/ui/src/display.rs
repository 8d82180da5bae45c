//! Presentation rules shared by the views, kept free of components so they
//! can be unit tested.

use api::Role;
use chrono::{Datelike, NaiveDate};
use practice::Difficulty;

/// Class of the role badge in the header.
pub fn role_badge_class(role: Role) -> &'static str {
    match role {
        Role::Child => "role-badge role-badge--blue",
        Role::Parent => "role-badge role-badge--green",
        Role::Therapist => "role-badge role-badge--purple",
        Role::Admin => "role-badge role-badge--gray",
    }
}

/// Stripe colour on top of an exercise card.
pub fn difficulty_class(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "stripe stripe--green",
        Difficulty::Medium => "stripe stripe--amber",
        Difficulty::Hard => "stripe stripe--red",
    }
}

pub fn practice_label(progress: u8) -> &'static str {
    if progress >= 100 {
        "Practice Again"
    } else {
        "Continue Practice"
    }
}

/// Children have no password of their own to manage.
pub fn shows_password_form(role: Role) -> bool {
    role != Role::Child
}

/// Only child accounts may sign in while the server is unreachable.
pub fn can_sign_in(loading: bool, online: bool, role: Role) -> bool {
    !loading && (online || role == Role::Child)
}

pub fn weekly_badge(days_practiced: u8) -> String {
    format!("{days_practiced}/7")
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn last_practice(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "Not yet".to_string())
}

pub fn footer_text(today: NaiveDate) -> String {
    format!("Speech Therapy Companion © {}", today.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_colours() {
        assert!(role_badge_class(Role::Child).ends_with("blue"));
        assert!(role_badge_class(Role::Parent).ends_with("green"));
        assert!(role_badge_class(Role::Therapist).ends_with("purple"));
        assert!(role_badge_class(Role::Admin).ends_with("gray"));
    }

    #[test]
    fn test_password_form_visibility() {
        assert!(!shows_password_form(Role::Child));
        assert!(shows_password_form(Role::Parent));
        assert!(shows_password_form(Role::Therapist));
        assert!(shows_password_form(Role::Admin));
    }

    #[test]
    fn test_sign_in_enablement() {
        assert!(can_sign_in(false, true, Role::Therapist));
        assert!(!can_sign_in(true, true, Role::Therapist));
        assert!(!can_sign_in(false, false, Role::Parent));
        assert!(can_sign_in(false, false, Role::Child));
    }

    #[test]
    fn test_practice_label() {
        assert_eq!(practice_label(100), "Practice Again");
        assert_eq!(practice_label(75), "Continue Practice");
        assert_eq!(practice_label(0), "Continue Practice");
    }

    #[test]
    fn test_dates() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(format_date(day), "Jun 3, 2024");
        assert_eq!(last_practice(None), "Not yet");
        assert_eq!(footer_text(day), "Speech Therapy Companion © 2024");
        assert_eq!(weekly_badge(4), "4/7");
    }
}
