//! Error vocabulary the stores report to their callers.

use ferrid_core::ErrorKind;
use ferrid_service::ServiceError;
use thiserror::Error;

/// Legacy code attached to every user store failure.
pub const USER_ERROR_CODE: &str = "2000";

/// Legacy code attached to every role store failure.
pub const ROLE_ERROR_CODE: &str = "1000";

/// Description used when a service declines an operation without a fault.
pub const FAILED_DESCRIPTION: &str = "operation reported failure";

/// Which store produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    User,
    Role,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Role => write!(f, "role"),
        }
    }
}

/// A failed store operation.
///
/// `kind` classifies the cause; `code()` keeps the coarse per-entity code
/// older consumers match on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity} store operation failed ({kind}): {description}")]
pub struct IdentityError {
    pub entity: Entity,
    pub kind: ErrorKind,
    pub description: String,
}

/// Result of a mutating store operation.
pub type IdentityResult = Result<(), IdentityError>;

impl IdentityError {
    pub fn new(entity: Entity, kind: ErrorKind, description: impl Into<String>) -> Self {
        Self {
            entity,
            kind,
            description: description.into(),
        }
    }

    /// The service ran but declined the operation.
    pub fn failed(entity: Entity) -> Self {
        Self::new(entity, ErrorKind::Unknown, FAILED_DESCRIPTION)
    }

    /// The service faulted. The description is the fault's message.
    pub fn from_service(entity: Entity, err: &ServiceError) -> Self {
        Self::new(entity, err.kind(), err.to_string())
    }

    /// The store does not provide a capability.
    pub fn unsupported(entity: Entity, capability: &str) -> Self {
        Self::new(
            entity,
            ErrorKind::Unsupported,
            format!("{} are not supported by this store", capability),
        )
    }

    /// Coarse per-entity code.
    pub fn code(&self) -> &'static str {
        match self.entity {
            Entity::User => USER_ERROR_CODE,
            Entity::Role => ROLE_ERROR_CODE,
        }
    }
}
