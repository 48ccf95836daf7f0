//! Backend construction from configuration.

use ferrid_core::{BackendKind, IdentityConfig};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ServiceError;
use crate::file::FileBackend;
use crate::memory::MemoryBackend;
use crate::service::{RoleService, UserClaimService, UserRoleService, UserService};
use crate::stub::{StubRoleService, StubUserClaimService, StubUserRoleService, StubUserService};

/// Snapshot path used when the file backend is selected without one.
pub const DEFAULT_SNAPSHOT_PATH: &str = "ferrid.json";

/// Handles to the four services a pair of stores needs.
#[derive(Clone)]
pub struct Backend {
    pub users: Arc<dyn UserService>,
    pub roles: Arc<dyn RoleService>,
    pub user_roles: Arc<dyn UserRoleService>,
    pub user_claims: Arc<dyn UserClaimService>,
}

impl Backend {
    /// Canned stub services.
    pub fn stub() -> Self {
        Self {
            users: Arc::new(StubUserService),
            roles: Arc::new(StubRoleService),
            user_roles: Arc::new(StubUserRoleService),
            user_claims: Arc::new(StubUserClaimService),
        }
    }

    /// Route all four contracts to one shared implementation.
    pub fn shared<B>(backend: Arc<B>) -> Self
    where
        B: UserService + RoleService + UserRoleService + UserClaimService + 'static,
    {
        Self {
            users: backend.clone(),
            roles: backend.clone(),
            user_roles: backend.clone(),
            user_claims: backend,
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").finish_non_exhaustive()
    }
}

/// Create the backend selected by configuration.
pub fn create_backend(config: &IdentityConfig) -> Result<Backend, ServiceError> {
    let unique_email = config.user.require_unique_email;

    match config.backend.kind {
        BackendKind::Stub => Ok(Backend::stub()),
        BackendKind::Memory => Ok(Backend::shared(Arc::new(MemoryBackend::new(unique_email)))),
        BackendKind::File => {
            let path = match &config.backend.path {
                Some(path) => path.clone(),
                None => {
                    tracing::warn!(
                        "File backend selected without a path, using {}",
                        DEFAULT_SNAPSHOT_PATH
                    );
                    PathBuf::from(DEFAULT_SNAPSHOT_PATH)
                }
            };
            Ok(Backend::shared(Arc::new(FileBackend::open(path, unique_email)?)))
        }
    }
}
