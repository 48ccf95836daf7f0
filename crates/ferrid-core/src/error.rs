//! Error classification shared across ferrid crates.

use serde::{Deserialize, Serialize};

/// Coarse cause of a failed identity operation.
///
/// Services classify their faults with this, and the store adapter carries
/// it through to callers next to the human-readable description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The record does not exist.
    NotFound,
    /// The write collides with an existing record.
    Conflict,
    /// The backend failed in a way that may succeed on a later attempt.
    Transient,
    /// The capability is not provided by this store.
    Unsupported,
    /// The caller cancelled the operation.
    Cancelled,
    /// Anything else, including service-reported failures without a cause.
    Unknown,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::Transient => write!(f, "transient"),
            Self::Unsupported => write!(f, "unsupported"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
