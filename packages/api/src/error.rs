//! # Server-side error type
//!
//! Every server function works in terms of [`ApiError`] and converts to
//! [`ServerFnError`] at the boundary with [`server_error`]. User-facing variants keep their message;
//! infrastructure failures are logged in full and reach the client only as a
//! generic message.

use dioxus::prelude::ServerFnError;

pub const GENERIC_MESSAGE: &str = "Something went wrong, please try again";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not signed in")]
    Unauthenticated,
    #[error("You do not have permission to do that")]
    Forbidden,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Current password is incorrect")]
    WrongPassword,
    #[error("{0}")]
    Validation(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("An account with this name already exists")]
    Duplicate,
    #[error("Admin signup has already been completed")]
    AdminSignupClosed,
    #[error("database error: {0}")]
    Database(sqlx::Error),
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => ApiError::Duplicate,
            _ => ApiError::Database(e),
        }
    }
}

impl ApiError {
    /// Errors the user cannot act on.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ApiError::Database(_) | ApiError::Session(_) | ApiError::Hash(_) | ApiError::Config(_)
        )
    }

    pub fn user_message(&self) -> String {
        if self.is_internal() {
            GENERIC_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

/// Log and convert for the client. Only user-facing messages cross over.
pub fn server_error(e: ApiError) -> ServerFnError {
    if e.is_internal() {
        tracing::error!("{}", e);
    } else {
        tracing::debug!("request rejected: {}", e);
    }
    ServerFnError::new(e.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_errors_are_hidden() {
        let e = ApiError::Config("DATABASE_URL not set".to_string());
        assert!(e.is_internal());
        assert_eq!(e.user_message(), GENERIC_MESSAGE);

        let e = ApiError::Database(sqlx::Error::RowNotFound);
        assert_eq!(e.user_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn test_user_errors_keep_message() {
        assert_eq!(ApiError::InvalidCredentials.user_message(), "Invalid credentials");
        assert_eq!(
            ApiError::Validation("Passwords do not match").user_message(),
            "Passwords do not match"
        );
        assert_eq!(ApiError::NotFound("Patient").user_message(), "Patient not found");
    }

    #[test]
    fn test_row_not_found_is_not_duplicate() {
        assert!(matches!(
            ApiError::from(sqlx::Error::RowNotFound),
            ApiError::Database(_)
        ));
    }
}
