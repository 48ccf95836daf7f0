//! JSON snapshot backend.
//!
//! Wraps a [`MemoryBackend`] and rewrites a single JSON document after every
//! successful mutation. Reads are served from memory. A missing snapshot file
//! starts an empty store.

use async_trait::async_trait;
use ferrid_core::{Claim, Role, User};
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::ServiceError;
use crate::memory::{IdentityState, MemoryBackend};
use crate::service::{RoleService, ServiceResult, UserClaimService, UserRoleService, UserService};

/// File-backed identity storage.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    inner: MemoryBackend,
    /// Serializes mutations with their snapshot writes.
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Open (or create) a snapshot at `path`.
    pub fn open(path: impl AsRef<Path>, require_unique_email: bool) -> Result<Self, ServiceError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let state = Self::load(&path)?;
        tracing::info!(
            path = %path.display(),
            users = state.users.len(),
            roles = state.roles.len(),
            "Loaded identity snapshot"
        );

        Ok(Self {
            path,
            inner: MemoryBackend::from_state(state, require_unique_email),
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<IdentityState, ServiceError> {
        if !path.exists() {
            return Ok(IdentityState::default());
        }

        let raw = fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Ok(IdentityState::default());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    /// Snapshot path with `.tmp` appended to the file name.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Rewrite the snapshot from the current in-memory state.
    fn save(&self) -> Result<(), ServiceError> {
        let state = self.inner.snapshot()?;
        let json = serde_json::to_string_pretty(&state)?;

        let tmp = self.tmp_path();
        {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), "Saved identity snapshot");
        Ok(())
    }

    /// Run a mutation and persist it if it changed state. A failed write
    /// rolls memory back to the state before the mutation.
    async fn persist<F>(&self, mutation: F) -> Result<ServiceResult, ServiceError>
    where
        F: Future<Output = Result<ServiceResult, ServiceError>>,
    {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.snapshot()?;

        let result = mutation.await;
        if let Ok(ServiceResult::Success) = result
            && let Err(e) = self.save()
        {
            tracing::error!(
                path = %self.path.display(),
                error = %e,
                "Failed to save identity snapshot, rolling back"
            );
            self.inner.restore(before)?;
            return Err(e);
        }
        result
    }
}

#[async_trait]
impl UserService for FileBackend {
    async fn create(&self, user: &User) -> Result<ServiceResult, ServiceError> {
        self.persist(UserService::create(&self.inner, user)).await
    }

    async fn find(&self, user_id: &str) -> Result<Option<User>, ServiceError> {
        UserService::find(&self.inner, user_id).await
    }

    async fn find_by_user_name(
        &self,
        normalized_user_name: &str,
    ) -> Result<Option<User>, ServiceError> {
        self.inner.find_by_user_name(normalized_user_name).await
    }

    async fn find_by_email(&self, normalized_email: &str) -> Result<Option<User>, ServiceError> {
        self.inner.find_by_email(normalized_email).await
    }

    async fn update(&self, user: &User) -> Result<ServiceResult, ServiceError> {
        self.persist(UserService::update(&self.inner, user)).await
    }

    async fn delete(&self, user_id: &str) -> Result<ServiceResult, ServiceError> {
        self.persist(UserService::delete(&self.inner, user_id)).await
    }
}

#[async_trait]
impl RoleService for FileBackend {
    async fn create(&self, role: &Role) -> Result<ServiceResult, ServiceError> {
        self.persist(RoleService::create(&self.inner, role)).await
    }

    async fn find(&self, role_id: &str) -> Result<Option<Role>, ServiceError> {
        RoleService::find(&self.inner, role_id).await
    }

    async fn find_by_name(&self, normalized_name: &str) -> Result<Option<Role>, ServiceError> {
        self.inner.find_by_name(normalized_name).await
    }

    async fn update(&self, role: &Role) -> Result<ServiceResult, ServiceError> {
        self.persist(RoleService::update(&self.inner, role)).await
    }

    async fn delete(&self, role_id: &str) -> Result<ServiceResult, ServiceError> {
        self.persist(RoleService::delete(&self.inner, role_id)).await
    }
}

#[async_trait]
impl UserRoleService for FileBackend {
    async fn add_to_role(
        &self,
        user_id: &str,
        role_name: &str,
    ) -> Result<ServiceResult, ServiceError> {
        self.persist(self.inner.add_to_role(user_id, role_name)).await
    }

    async fn roles_for_user(&self, user_id: &str) -> Result<Vec<Role>, ServiceError> {
        self.inner.roles_for_user(user_id).await
    }

    async fn users_in_role(&self, role_name: &str) -> Result<Vec<User>, ServiceError> {
        self.inner.users_in_role(role_name).await
    }

    async fn remove_from_role(
        &self,
        user_id: &str,
        role_name: &str,
    ) -> Result<ServiceResult, ServiceError> {
        self.persist(self.inner.remove_from_role(user_id, role_name)).await
    }
}

#[async_trait]
impl UserClaimService for FileBackend {
    async fn add_claims(
        &self,
        user_id: &str,
        claims: &[Claim],
    ) -> Result<ServiceResult, ServiceError> {
        self.persist(self.inner.add_claims(user_id, claims)).await
    }

    async fn claims_for_user(&self, user_id: &str) -> Result<Vec<Claim>, ServiceError> {
        self.inner.claims_for_user(user_id).await
    }

    async fn users_for_claim(&self, claim: &Claim) -> Result<Vec<User>, ServiceError> {
        self.inner.users_for_claim(claim).await
    }

    async fn replace_claim(
        &self,
        user_id: &str,
        claim: &Claim,
        new_claim: &Claim,
    ) -> Result<ServiceResult, ServiceError> {
        self.persist(self.inner.replace_claim(user_id, claim, new_claim)).await
    }

    async fn remove_claim(
        &self,
        user_id: &str,
        claim: &Claim,
    ) -> Result<ServiceResult, ServiceError> {
        self.persist(self.inner.remove_claim(user_id, claim)).await
    }
}
