//! Server configuration from environment variables (and `.env` via dotenvy).
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DATABASE_URL` | required |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |
//! | `SESSION_SECURE` | `false` |
//! | `SESSION_INACTIVITY_DAYS` | `7` |
//! | `COMPANION_CONFIG` | `companion.toml` (missing file = defaults) |

use std::path::PathBuf;
use std::sync::OnceLock;

use practice::CompanionConfig;

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub secure_cookies: bool,
    pub session_inactivity_days: i64,
    pub companion: CompanionConfig,
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ServerConfig {
    /// Build from the process environment, loading `.env` first.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| ApiError::Config("DATABASE_URL not set".into()))?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("invalid DATABASE_MAX_CONNECTIONS: {v}")))?,
            None => 5,
        };

        let secure_cookies = match lookup("SESSION_SECURE") {
            Some(v) => parse_bool(&v)
                .ok_or_else(|| ApiError::Config(format!("invalid SESSION_SECURE: {v}")))?,
            None => false,
        };

        let session_inactivity_days = match lookup("SESSION_INACTIVITY_DAYS") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("invalid SESSION_INACTIVITY_DAYS: {v}")))?,
            None => 7,
        };

        let config_path = lookup("COMPANION_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CompanionConfig::filename()));
        let companion =
            CompanionConfig::load(&config_path).map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            database_url,
            max_connections,
            secure_cookies,
            session_inactivity_days,
            companion,
        })
    }
}

static CONFIG: OnceLock<ServerConfig> = OnceLock::new();

/// Process-wide configuration, read on first use.
pub fn server_config() -> Result<&'static ServerConfig, ApiError> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = ServerConfig::from_env()?;
    Ok(CONFIG.get_or_init(|| config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/companion"),
            ("COMPANION_CONFIG", "/nonexistent/companion.toml"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 5);
        assert!(!config.secure_cookies);
        assert_eq!(config.session_inactivity_days, 7);
        assert_eq!(config.companion, CompanionConfig::default());
    }

    #[test]
    fn test_missing_database_url() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/companion"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("SESSION_SECURE", "yes"),
            ("COMPANION_CONFIG", "/nonexistent/companion.toml"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 12);
        assert!(config.secure_cookies);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("SESSION_SECURE", "maybe"),
        ]))
        .is_err());
        assert!(ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]))
        .is_err());
    }
}
