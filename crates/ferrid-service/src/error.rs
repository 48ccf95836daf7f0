//! Error types for the service crate.

use ferrid_core::ErrorKind;
use thiserror::Error;

/// Faults raised by a service implementation.
///
/// A fault is distinct from a [`ServiceResult::Failure`](crate::ServiceResult),
/// which a service returns when it ran correctly but declined the operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The write collides with an existing record.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend is temporarily unavailable.
    #[error("transient failure: {0}")]
    Transient(String),

    /// The operation is not provided by this backend.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// The caller cancelled the operation before it completed.
    #[error("operation cancelled")]
    Cancelled,

    /// Failed to encode or decode persisted state.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    /// Classify this fault.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Transient(_) | Self::Io(_) => ErrorKind::Transient,
            Self::Unsupported(_) => ErrorKind::Unsupported,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Serialization(_) | Self::Internal(_) => ErrorKind::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(ServiceError::NotFound("u1".into()).kind(), ErrorKind::NotFound);
        assert_eq!(ServiceError::Conflict("dup".into()).kind(), ErrorKind::Conflict);
        assert_eq!(ServiceError::Cancelled.kind(), ErrorKind::Cancelled);
        assert_eq!(
            ServiceError::Io(std::io::Error::other("disk")).kind(),
            ErrorKind::Transient
        );
        assert_eq!(
            ServiceError::Internal(anyhow::anyhow!("boom")).kind(),
            ErrorKind::Unknown
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ServiceError::Transient("database offline".into()).to_string(),
            "transient failure: database offline"
        );
        assert_eq!(ServiceError::Cancelled.to_string(), "operation cancelled");
    }
}
