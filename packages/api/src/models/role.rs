//! Account roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Child,
    Parent,
    Therapist,
    Admin,
}

impl Role {
    /// Login tabs, in display order.
    pub const ALL: [Role; 4] = [Role::Child, Role::Parent, Role::Therapist, Role::Admin];

    /// Stored form, as found in the `users.role` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Child => "child",
            Role::Parent => "parent",
            Role::Therapist => "therapist",
            Role::Admin => "admin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Child => "Child",
            Role::Parent => "Parent",
            Role::Therapist => "Therapist",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "child" => Ok(Role::Child),
            "parent" => Ok(Role::Parent),
            "therapist" => Ok(Role::Therapist),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_stored_form() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_rejects_unknown_and_capitalized() {
        assert!("Admin".parse::<Role>().is_err());
        assert!("patient".parse::<Role>().is_err());
        let err = "patient".parse::<Role>().unwrap_err();
        assert_eq!(err.to_string(), "unknown role: patient");
    }

    #[test]
    fn test_label() {
        assert_eq!(Role::Therapist.label(), "Therapist");
        assert_eq!(Role::Child.to_string(), "child");
    }
}
