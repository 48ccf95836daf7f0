//! Lockout configuration.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use super::default_true;

/// Controls when repeated failed sign-ins lock an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockoutOptions {
    /// Whether newly created users have lockout enabled.
    #[serde(default = "default_true")]
    pub allowed_for_new_users: bool,

    /// Failed attempts before the account is locked.
    #[serde(default = "default_max_failed_access_attempts")]
    pub max_failed_access_attempts: u32,

    /// Lockout duration in seconds.
    #[serde(default = "default_lockout_secs")]
    pub default_lockout_secs: u64,
}

impl LockoutOptions {
    /// Lockout duration as a time delta, saturating at the largest
    /// representable span.
    pub fn default_lockout(&self) -> TimeDelta {
        i64::try_from(self.default_lockout_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }
}

impl Default for LockoutOptions {
    fn default() -> Self {
        Self {
            allowed_for_new_users: default_true(),
            max_failed_access_attempts: default_max_failed_access_attempts(),
            default_lockout_secs: default_lockout_secs(),
        }
    }
}

fn default_max_failed_access_attempts() -> u32 {
    5
}

fn default_lockout_secs() -> u64 {
    // 30 days
    30 * 24 * 60 * 60
}
