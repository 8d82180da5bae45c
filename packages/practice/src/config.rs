//! # Application configuration — `companion.toml`
//!
//! Deployment-level settings shared by the server and the UI. A missing or
//! empty file is equivalent to [`CompanionConfig::default`].
//!
//! ```toml
//! [organization]
//! default_id = "org-1"                        # organization given to the bootstrap admin
//! email_domain = "speechtherapy.example.com"  # domain of generated login emails
//!
//! [sync]
//! connectivity_check_secs = 30                # how often the UI checks the server
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanionConfig {
    #[serde(default)]
    pub organization: OrganizationConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrganizationConfig {
    #[serde(default = "default_organization_id")]
    pub default_id: String,
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
}

fn default_organization_id() -> String {
    "org-1".to_string()
}

fn default_email_domain() -> String {
    "speechtherapy.example.com".to_string()
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            default_id: default_organization_id(),
            email_domain: default_email_domain(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_connectivity_check")]
    pub connectivity_check_secs: u32,
}

fn default_connectivity_check() -> u32 {
    30
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            connectivity_check_secs: default_connectivity_check(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl CompanionConfig {
    pub fn filename() -> &'static str {
        "companion.toml"
    }

    pub fn with_organization(mut self, id: &str) -> Self {
        self.organization.default_id = id.to_string();
        self
    }

    pub fn with_connectivity_check(mut self, secs: u32) -> Self {
        self.sync.connectivity_check_secs = secs;
        self
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_toml(&s).map_err(ConfigError::Parse),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = CompanionConfig::from_toml("").unwrap();
        assert_eq!(config, CompanionConfig::default());
        assert_eq!(config.organization.default_id, "org-1");
        assert_eq!(config.sync.connectivity_check_secs, 30);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = CompanionConfig::from_toml("[organization]\ndefault_id = \"clinic-7\"\n").unwrap();
        assert_eq!(config.organization.default_id, "clinic-7");
        assert_eq!(config.organization.email_domain, "speechtherapy.example.com");
    }

    #[test]
    fn test_builder_survives_toml() {
        let config = CompanionConfig::default()
            .with_organization("clinic-2")
            .with_connectivity_check(10);
        let parsed = CompanionConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("companion_missing_config.toml");
        let _ = std::fs::remove_file(&path);
        assert_eq!(CompanionConfig::load(&path).unwrap(), CompanionConfig::default());
    }

    #[test]
    fn test_load_reports_parse_error() {
        let path = std::env::temp_dir().join(format!("companion_bad_{}.toml", std::process::id()));
        std::fs::write(&path, "[sync]\nconnectivity_check_secs = \"often\"\n").unwrap();
        let err = CompanionConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid config:"));
        let _ = std::fs::remove_file(&path);
    }
}
