//! Identity records.
//!
//! Records are plain data. The store adapter mutates them field by field and
//! only persists them through an explicit update call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::normalize::normalize;

/// A user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable unique identifier.
    pub id: String,

    /// Display user name.
    pub user_name: String,

    /// Lookup form of `user_name`.
    pub normalized_user_name: String,

    #[serde(default)]
    pub email: String,

    /// Lookup form of `email`.
    #[serde(default)]
    pub normalized_email: String,

    #[serde(default)]
    pub email_confirmed: bool,

    /// Opaque password hash. `None` for accounts without a local password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    /// Token rotated whenever credentials change, forcing re-authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_stamp: Option<String>,

    /// End of the current lockout, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lockout_end: Option<DateTime<Utc>>,

    #[serde(default)]
    pub lockout_enabled: bool,

    #[serde(default)]
    pub access_failed_count: u32,
}

impl User {
    /// Create a user with a generated id and security stamp.
    pub fn new(user_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), user_name, email)
    }

    /// Create a user with an explicit id.
    pub fn with_id(
        id: impl Into<String>,
        user_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let user_name = user_name.into();
        let email = email.into();

        Self {
            id: id.into(),
            normalized_user_name: normalize(&user_name),
            normalized_email: normalize(&email),
            user_name,
            email,
            security_stamp: Some(Uuid::new_v4().to_string()),
            ..Default::default()
        }
    }
}

/// A named role users can be members of.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub normalized_name: String,
}

impl Role {
    /// Create a role with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    /// Create a role with an explicit id.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            normalized_name: normalize(&name),
            name,
        }
    }
}

/// A type/value pair used for claims-based authorization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    /// Claim type, e.g. `"department"` or a URI.
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for Claim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.claim_type, self.value)
    }
}

/// An external login provider association (e.g. an OAuth identity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginInfo {
    pub login_provider: String,
    pub provider_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl LoginInfo {
    pub fn new(login_provider: impl Into<String>, provider_key: impl Into<String>) -> Self {
        Self {
            login_provider: login_provider.into(),
            provider_key: provider_key.into(),
            display_name: None,
        }
    }
}
