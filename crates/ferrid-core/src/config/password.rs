//! Password strength rules.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::default_true;

/// Password requirements applied before a hash is ever computed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordOptions {
    #[serde(default = "default_true")]
    pub require_digit: bool,

    #[serde(default = "default_true")]
    pub require_lowercase: bool,

    #[serde(default = "default_true")]
    pub require_uppercase: bool,

    #[serde(default = "default_true")]
    pub require_non_alphanumeric: bool,

    /// Minimum length in characters.
    #[serde(default = "default_required_length")]
    pub required_length: usize,

    /// Minimum number of distinct characters.
    #[serde(default = "default_required_unique_chars")]
    pub required_unique_chars: usize,
}

/// A rule a candidate password failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordViolation {
    #[error("password must be at least {required} characters")]
    TooShort { required: usize },

    #[error("password must use at least {required} different characters")]
    TooFewUniqueChars { required: usize },

    #[error("password must contain a digit")]
    MissingDigit,

    #[error("password must contain a lowercase letter")]
    MissingLowercase,

    #[error("password must contain an uppercase letter")]
    MissingUppercase,

    #[error("password must contain a non-alphanumeric character")]
    MissingNonAlphanumeric,
}

impl PasswordOptions {
    /// Check a candidate password, returning every rule it breaks.
    pub fn check(&self, password: &str) -> Result<(), Vec<PasswordViolation>> {
        let mut violations = Vec::new();

        if password.chars().count() < self.required_length {
            violations.push(PasswordViolation::TooShort {
                required: self.required_length,
            });
        }

        let unique: HashSet<char> = password.chars().collect();
        if unique.len() < self.required_unique_chars {
            violations.push(PasswordViolation::TooFewUniqueChars {
                required: self.required_unique_chars,
            });
        }

        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            violations.push(PasswordViolation::MissingDigit);
        }
        if self.require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
            violations.push(PasswordViolation::MissingLowercase);
        }
        if self.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
            violations.push(PasswordViolation::MissingUppercase);
        }
        if self.require_non_alphanumeric && password.chars().all(|c| c.is_alphanumeric()) {
            violations.push(PasswordViolation::MissingNonAlphanumeric);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            require_digit: true,
            require_lowercase: true,
            require_uppercase: true,
            require_non_alphanumeric: true,
            required_length: default_required_length(),
            required_unique_chars: default_required_unique_chars(),
        }
    }
}

fn default_required_length() -> usize {
    8
}

fn default_required_unique_chars() -> usize {
    3
}
