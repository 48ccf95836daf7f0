//! In-memory identity backend.
//!
//! A single [`MemoryBackend`] implements all four service contracts over one
//! lock-guarded state, so memberships and claims stay consistent with the
//! user and role records they reference.

use async_trait::async_trait;
use ferrid_core::{Claim, Role, User, normalize};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::ServiceError;
use crate::service::{RoleService, ServiceResult, UserClaimService, UserRoleService, UserService};

/// Everything a backend persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityState {
    /// Users keyed by id.
    #[serde(default)]
    pub users: BTreeMap<String, User>,

    /// Roles keyed by id.
    #[serde(default)]
    pub roles: BTreeMap<String, Role>,

    /// Role ids per user id.
    #[serde(default)]
    pub user_roles: BTreeMap<String, BTreeSet<String>>,

    /// Claims per user id, in insertion order.
    #[serde(default)]
    pub user_claims: BTreeMap<String, Vec<Claim>>,
}

/// Whether a stored lookup field matches a normalized search key. Stored
/// fields are normalized again since callers may set them verbatim. An empty
/// key never matches.
fn key_matches(stored: &str, key: &str) -> bool {
    !key.is_empty() && normalize(stored) == key
}

impl IdentityState {
    fn role_by_name(&self, role_name: &str) -> Option<&Role> {
        let key = normalize(role_name);
        self.roles
            .values()
            .find(|r| key_matches(&r.normalized_name, &key))
    }

    fn role_id_by_name(&self, role_name: &str) -> Option<String> {
        self.role_by_name(role_name).map(|r| r.id.clone())
    }

    fn user_by_name(&self, user_name: &str) -> Option<&User> {
        let key = normalize(user_name);
        self.users
            .values()
            .find(|u| key_matches(&u.normalized_user_name, &key))
    }

    fn user_by_email(&self, email: &str) -> Option<&User> {
        let key = normalize(email);
        self.users
            .values()
            .find(|u| key_matches(&u.normalized_email, &key))
    }

    fn check_user_unique(&self, user: &User, unique_email: bool) -> Result<(), ServiceError> {
        let name = normalize(&user.normalized_user_name);
        let email = normalize(&user.normalized_email);

        for other in self.users.values().filter(|u| u.id != user.id) {
            if key_matches(&other.normalized_user_name, &name) {
                return Err(ServiceError::Conflict(format!(
                    "user name '{}' is already taken",
                    user.user_name
                )));
            }
            if unique_email && key_matches(&other.normalized_email, &email) {
                return Err(ServiceError::Conflict(format!(
                    "email '{}' is already registered",
                    user.email
                )));
            }
        }
        Ok(())
    }

    fn check_role_unique(&self, role: &Role) -> Result<(), ServiceError> {
        let name = normalize(&role.normalized_name);
        if self
            .roles
            .values()
            .any(|r| r.id != role.id && key_matches(&r.normalized_name, &name))
        {
            return Err(ServiceError::Conflict(format!(
                "role '{}' already exists",
                role.name
            )));
        }
        Ok(())
    }
}

/// Process-local identity storage.
#[derive(Debug)]
pub struct MemoryBackend {
    state: RwLock<IdentityState>,
    require_unique_email: bool,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new(require_unique_email: bool) -> Self {
        Self::from_state(IdentityState::default(), require_unique_email)
    }

    /// Create a backend seeded with existing state.
    pub fn from_state(state: IdentityState, require_unique_email: bool) -> Self {
        Self {
            state: RwLock::new(state),
            require_unique_email,
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Result<IdentityState, ServiceError> {
        Ok(self.read()?.clone())
    }

    /// Replace the current state wholesale.
    pub fn restore(&self, state: IdentityState) -> Result<(), ServiceError> {
        *self.write()? = state;
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IdentityState>, ServiceError> {
        self.state
            .read()
            .map_err(|_| ServiceError::Internal(anyhow::anyhow!("identity state lock poisoned")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IdentityState>, ServiceError> {
        self.state
            .write()
            .map_err(|_| ServiceError::Internal(anyhow::anyhow!("identity state lock poisoned")))
    }
}

#[async_trait]
impl UserService for MemoryBackend {
    async fn create(&self, user: &User) -> Result<ServiceResult, ServiceError> {
        let mut state = self.write()?;

        if state.users.contains_key(&user.id) {
            return Err(ServiceError::Conflict(format!(
                "user id '{}' already exists",
                user.id
            )));
        }
        state.check_user_unique(user, self.require_unique_email)?;

        state.users.insert(user.id.clone(), user.clone());
        tracing::debug!(user_id = %user.id, "Created user");
        Ok(ServiceResult::Success)
    }

    async fn find(&self, user_id: &str) -> Result<Option<User>, ServiceError> {
        Ok(self.read()?.users.get(user_id).cloned())
    }

    async fn find_by_user_name(
        &self,
        normalized_user_name: &str,
    ) -> Result<Option<User>, ServiceError> {
        Ok(self.read()?.user_by_name(normalized_user_name).cloned())
    }

    async fn find_by_email(&self, normalized_email: &str) -> Result<Option<User>, ServiceError> {
        Ok(self.read()?.user_by_email(normalized_email).cloned())
    }

    async fn update(&self, user: &User) -> Result<ServiceResult, ServiceError> {
        let mut state = self.write()?;

        if !state.users.contains_key(&user.id) {
            return Err(ServiceError::NotFound(format!("user '{}'", user.id)));
        }
        state.check_user_unique(user, self.require_unique_email)?;

        state.users.insert(user.id.clone(), user.clone());
        tracing::debug!(user_id = %user.id, "Updated user");
        Ok(ServiceResult::Success)
    }

    async fn delete(&self, user_id: &str) -> Result<ServiceResult, ServiceError> {
        let mut state = self.write()?;

        if state.users.remove(user_id).is_none() {
            return Err(ServiceError::NotFound(format!("user '{}'", user_id)));
        }
        state.user_roles.remove(user_id);
        state.user_claims.remove(user_id);

        tracing::debug!(user_id, "Deleted user");
        Ok(ServiceResult::Success)
    }
}

#[async_trait]
impl RoleService for MemoryBackend {
    async fn create(&self, role: &Role) -> Result<ServiceResult, ServiceError> {
        let mut state = self.write()?;

        if state.roles.contains_key(&role.id) {
            return Err(ServiceError::Conflict(format!(
                "role id '{}' already exists",
                role.id
            )));
        }
        state.check_role_unique(role)?;

        state.roles.insert(role.id.clone(), role.clone());
        tracing::debug!(role_id = %role.id, role = %role.name, "Created role");
        Ok(ServiceResult::Success)
    }

    async fn find(&self, role_id: &str) -> Result<Option<Role>, ServiceError> {
        Ok(self.read()?.roles.get(role_id).cloned())
    }

    async fn find_by_name(&self, normalized_name: &str) -> Result<Option<Role>, ServiceError> {
        Ok(self.read()?.role_by_name(normalized_name).cloned())
    }

    async fn update(&self, role: &Role) -> Result<ServiceResult, ServiceError> {
        let mut state = self.write()?;

        if !state.roles.contains_key(&role.id) {
            return Err(ServiceError::NotFound(format!("role '{}'", role.id)));
        }
        state.check_role_unique(role)?;

        state.roles.insert(role.id.clone(), role.clone());
        tracing::debug!(role_id = %role.id, "Updated role");
        Ok(ServiceResult::Success)
    }

    async fn delete(&self, role_id: &str) -> Result<ServiceResult, ServiceError> {
        let mut state = self.write()?;

        if state.roles.remove(role_id).is_none() {
            return Err(ServiceError::NotFound(format!("role '{}'", role_id)));
        }
        for members in state.user_roles.values_mut() {
            members.remove(role_id);
        }

        tracing::debug!(role_id, "Deleted role");
        Ok(ServiceResult::Success)
    }
}

#[async_trait]
impl UserRoleService for MemoryBackend {
    async fn add_to_role(
        &self,
        user_id: &str,
        role_name: &str,
    ) -> Result<ServiceResult, ServiceError> {
        let mut state = self.write()?;

        if !state.users.contains_key(user_id) {
            return Err(ServiceError::NotFound(format!("user '{}'", user_id)));
        }
        let role_id = state
            .role_id_by_name(role_name)
            .ok_or_else(|| ServiceError::NotFound(format!("role '{}'", role_name)))?;

        let inserted = state
            .user_roles
            .entry(user_id.to_string())
            .or_default()
            .insert(role_id);

        Ok(if inserted {
            ServiceResult::Success
        } else {
            ServiceResult::Failure
        })
    }

    async fn roles_for_user(&self, user_id: &str) -> Result<Vec<Role>, ServiceError> {
        let state = self.read()?;
        let Some(role_ids) = state.user_roles.get(user_id) else {
            return Ok(Vec::new());
        };

        Ok(role_ids
            .iter()
            .filter_map(|id| state.roles.get(id).cloned())
            .collect())
    }

    async fn users_in_role(&self, role_name: &str) -> Result<Vec<User>, ServiceError> {
        let state = self.read()?;
        let Some(role_id) = state.role_id_by_name(role_name) else {
            return Ok(Vec::new());
        };

        Ok(state
            .user_roles
            .iter()
            .filter(|(_, role_ids)| role_ids.contains(&role_id))
            .filter_map(|(user_id, _)| state.users.get(user_id).cloned())
            .collect())
    }

    async fn remove_from_role(
        &self,
        user_id: &str,
        role_name: &str,
    ) -> Result<ServiceResult, ServiceError> {
        let mut state = self.write()?;
        let Some(role_id) = state.role_id_by_name(role_name) else {
            return Ok(ServiceResult::Failure);
        };

        let removed = state
            .user_roles
            .get_mut(user_id)
            .is_some_and(|role_ids| role_ids.remove(&role_id));

        Ok(if removed {
            ServiceResult::Success
        } else {
            ServiceResult::Failure
        })
    }
}

#[async_trait]
impl UserClaimService for MemoryBackend {
    async fn add_claims(
        &self,
        user_id: &str,
        claims: &[Claim],
    ) -> Result<ServiceResult, ServiceError> {
        let mut state = self.write()?;

        if !state.users.contains_key(user_id) {
            return Err(ServiceError::NotFound(format!("user '{}'", user_id)));
        }

        let held = state.user_claims.entry(user_id.to_string()).or_default();
        for claim in claims {
            if !held.contains(claim) {
                held.push(claim.clone());
            }
        }
        Ok(ServiceResult::Success)
    }

    async fn claims_for_user(&self, user_id: &str) -> Result<Vec<Claim>, ServiceError> {
        Ok(self
            .read()?
            .user_claims
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn users_for_claim(&self, claim: &Claim) -> Result<Vec<User>, ServiceError> {
        let state = self.read()?;
        Ok(state
            .user_claims
            .iter()
            .filter(|(_, held)| held.contains(claim))
            .filter_map(|(user_id, _)| state.users.get(user_id).cloned())
            .collect())
    }

    async fn replace_claim(
        &self,
        user_id: &str,
        claim: &Claim,
        new_claim: &Claim,
    ) -> Result<ServiceResult, ServiceError> {
        let mut state = self.write()?;
        let Some(held) = state.user_claims.get_mut(user_id) else {
            return Ok(ServiceResult::Failure);
        };
        if !held.contains(claim) {
            return Ok(ServiceResult::Failure);
        }

        let mut replaced: Vec<Claim> = Vec::with_capacity(held.len());
        for existing in held.drain(..) {
            let next = if &existing == claim {
                new_claim.clone()
            } else {
                existing
            };
            if !replaced.contains(&next) {
                replaced.push(next);
            }
        }
        *held = replaced;

        Ok(ServiceResult::Success)
    }

    async fn remove_claim(
        &self,
        user_id: &str,
        claim: &Claim,
    ) -> Result<ServiceResult, ServiceError> {
        let mut state = self.write()?;
        let Some(held) = state.user_claims.get_mut(user_id) else {
            return Ok(ServiceResult::Failure);
        };

        let before = held.len();
        held.retain(|c| c != claim);

        Ok(if held.len() < before {
            ServiceResult::Success
        } else {
            ServiceResult::Failure
        })
    }
}
