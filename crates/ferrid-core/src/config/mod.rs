//! Configuration types for ferrid.
//!
//! Configuration is loaded from a single YAML file (`ferrid.yaml` by default,
//! overridable through the `FERRID_CONFIG` environment variable):
//!
//! ```yaml
//! lockout:
//!   max_failed_access_attempts: 5
//!   default_lockout_secs: 2592000
//! password:
//!   required_length: 8
//! user:
//!   require_unique_email: true
//! backend:
//!   kind: file
//!   path: data/ferrid.json
//! ```

pub mod backend;
pub mod lockout;
pub mod password;

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use backend::{BackendConfig, BackendKind};
pub use lockout::LockoutOptions;
pub use password::{PasswordOptions, PasswordViolation};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "FERRID_CONFIG";

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "ferrid.yaml";

/// Complete ferrid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Account lockout rules.
    #[serde(default)]
    pub lockout: LockoutOptions,

    /// Password strength rules.
    #[serde(default)]
    pub password: PasswordOptions,

    /// User record rules.
    #[serde(default)]
    pub user: UserOptions,

    /// Persistence backend.
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Rules on user records enforced by persisting backends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserOptions {
    /// Reject two users sharing a normalized email.
    #[serde(default = "default_true")]
    pub require_unique_email: bool,
}

impl Default for UserOptions {
    fn default() -> Self {
        Self {
            require_unique_email: default_true(),
        }
    }
}

/// Serde default shared by the boolean options that start enabled.
pub(crate) fn default_true() -> bool {
    true
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IdentityConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `FERRID_CONFIG` or `ferrid.yaml`.
    ///
    /// A missing file yields the defaults; a present but invalid file is an
    /// error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Reject settings no backend or policy can honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lockout.max_failed_access_attempts == 0 {
            return Err(ConfigError::Config(
                "lockout.max_failed_access_attempts must be at least 1".to_string(),
            ));
        }
        if self.password.required_unique_chars > self.password.required_length {
            return Err(ConfigError::Config(format!(
                "password.required_unique_chars ({}) exceeds password.required_length ({})",
                self.password.required_unique_chars, self.password.required_length
            )));
        }
        Ok(())
    }
}

fn config_path() -> PathBuf {
    if let Ok(p) = env::var(CONFIG_ENV) {
        return PathBuf::from(p);
    }
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = IdentityConfig::default();
        assert!(config.lockout.allowed_for_new_users);
        assert_eq!(config.lockout.max_failed_access_attempts, 5);
        assert_eq!(config.lockout.default_lockout().num_days(), 30);
        assert!(config.user.require_unique_email);
        assert_eq!(config.backend.kind, BackendKind::Stub);
        assert_eq!(config.password.required_length, 8);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
lockout:
  max_failed_access_attempts: 3
backend:
  kind: file
  path: /var/lib/ferrid/identity.json
"#;
        let config = IdentityConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.lockout.max_failed_access_attempts, 3);
        assert_eq!(config.lockout.default_lockout_secs, 30 * 24 * 60 * 60);
        assert_eq!(config.backend.kind, BackendKind::File);
        assert_eq!(
            config.backend.path,
            Some(PathBuf::from("/var/lib/ferrid/identity.json"))
        );
        assert!(config.password.require_digit);
    }

    #[test]
    fn test_omitted_flags_default_to_enabled() {
        let yaml = r#"
lockout:
  max_failed_access_attempts: 2
password:
  required_length: 10
user: {}
"#;
        let config = IdentityConfig::from_yaml(yaml).unwrap();
        assert!(config.lockout.allowed_for_new_users);
        assert!(config.password.require_digit);
        assert!(config.password.require_lowercase);
        assert!(config.password.require_uppercase);
        assert!(config.password.require_non_alphanumeric);
        assert!(config.user.require_unique_email);
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let yaml = "lockout:\n  max_failed_access_attempts: 0\n";
        let err = IdentityConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_backend() {
        let yaml = "backend:\n  kind: postgres\n";
        assert!(matches!(
            IdentityConfig::from_yaml(yaml),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "user:\n  require_unique_email: false").unwrap();

        let config = IdentityConfig::from_file(file.path()).unwrap();
        assert!(!config.user.require_unique_email);
    }
}
