//! Role store backed by an injected service.

use async_trait::async_trait;
use ferrid_core::Role;
use ferrid_service::{Backend, RoleService};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::error::{Entity, IdentityResult};
use crate::outcome::{complete, found, guarded};
use crate::traits::RoleStore;

/// Implements [`RoleStore`] over a [`RoleService`].
#[derive(Clone)]
pub struct CustomRoleStore {
    roles: Arc<dyn RoleService>,
}

impl CustomRoleStore {
    pub fn new(roles: Arc<dyn RoleService>) -> Self {
        Self { roles }
    }

    /// Wire the store to a configured backend.
    pub fn from_backend(backend: &Backend) -> Self {
        Self::new(backend.roles.clone())
    }
}

impl std::fmt::Debug for CustomRoleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomRoleStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl RoleStore for CustomRoleStore {
    async fn create(&self, role: &Role, cancel: &CancellationToken) -> IdentityResult {
        let outcome = guarded(cancel, self.roles.create(role)).await;
        complete(Entity::Role, "create", &role.id, outcome)
    }

    async fn update(&self, role: &Role, cancel: &CancellationToken) -> IdentityResult {
        let outcome = guarded(cancel, self.roles.update(role)).await;
        complete(Entity::Role, "update", &role.id, outcome)
    }

    async fn delete(&self, role: &Role, cancel: &CancellationToken) -> IdentityResult {
        let outcome = guarded(cancel, self.roles.delete(&role.id)).await;
        complete(Entity::Role, "delete", &role.id, outcome)
    }

    async fn find_by_id(&self, role_id: &str, cancel: &CancellationToken) -> Option<Role> {
        found(
            "find_by_id",
            role_id,
            guarded(cancel, self.roles.find(role_id)).await,
        )
    }

    async fn find_by_name(
        &self,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Option<Role> {
        found(
            "find_by_name",
            normalized_role_name,
            guarded(cancel, self.roles.find_by_name(normalized_role_name)).await,
        )
    }

    fn role_id<'r>(&self, role: &'r Role) -> &'r str {
        &role.id
    }

    fn role_name<'r>(&self, role: &'r Role) -> &'r str {
        &role.name
    }

    fn set_role_name(&self, role: &mut Role, role_name: &str) {
        role.name = role_name.to_string();
    }

    fn normalized_role_name<'r>(&self, role: &'r Role) -> &'r str {
        &role.normalized_name
    }

    fn set_normalized_role_name(&self, role: &mut Role, normalized_name: &str) {
        role.normalized_name = normalized_name.to_string();
    }
}
