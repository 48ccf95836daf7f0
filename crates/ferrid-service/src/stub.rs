//! Placeholder services.
//!
//! These perform no storage at all: every mutation reports success, every
//! lookup hands back a fresh empty record and every listing is empty. They
//! mark the seam where a real persistence engine plugs in.

use async_trait::async_trait;
use ferrid_core::{Claim, Role, User};

use crate::error::ServiceError;
use crate::service::{RoleService, ServiceResult, UserClaimService, UserRoleService, UserService};

/// Stub user service.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubUserService;

#[async_trait]
impl UserService for StubUserService {
    async fn create(&self, user: &User) -> Result<ServiceResult, ServiceError> {
        tracing::trace!(user_id = %user.id, "stub create user");
        Ok(ServiceResult::Success)
    }

    async fn find(&self, user_id: &str) -> Result<Option<User>, ServiceError> {
        tracing::trace!(user_id, "stub find user");
        Ok(Some(User::default()))
    }

    async fn find_by_user_name(
        &self,
        normalized_user_name: &str,
    ) -> Result<Option<User>, ServiceError> {
        tracing::trace!(normalized_user_name, "stub find user by name");
        Ok(Some(User::default()))
    }

    async fn find_by_email(&self, normalized_email: &str) -> Result<Option<User>, ServiceError> {
        tracing::trace!(normalized_email, "stub find user by email");
        Ok(Some(User::default()))
    }

    async fn update(&self, user: &User) -> Result<ServiceResult, ServiceError> {
        tracing::trace!(user_id = %user.id, "stub update user");
        Ok(ServiceResult::Success)
    }

    async fn delete(&self, user_id: &str) -> Result<ServiceResult, ServiceError> {
        tracing::trace!(user_id, "stub delete user");
        Ok(ServiceResult::Success)
    }
}

/// Stub role service.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubRoleService;

#[async_trait]
impl RoleService for StubRoleService {
    async fn create(&self, role: &Role) -> Result<ServiceResult, ServiceError> {
        tracing::trace!(role_id = %role.id, "stub create role");
        Ok(ServiceResult::Success)
    }

    async fn find(&self, role_id: &str) -> Result<Option<Role>, ServiceError> {
        tracing::trace!(role_id, "stub find role");
        Ok(Some(Role::default()))
    }

    async fn find_by_name(&self, normalized_name: &str) -> Result<Option<Role>, ServiceError> {
        tracing::trace!(normalized_name, "stub find role by name");
        Ok(Some(Role::default()))
    }

    async fn update(&self, role: &Role) -> Result<ServiceResult, ServiceError> {
        tracing::trace!(role_id = %role.id, "stub update role");
        Ok(ServiceResult::Success)
    }

    async fn delete(&self, role_id: &str) -> Result<ServiceResult, ServiceError> {
        tracing::trace!(role_id, "stub delete role");
        Ok(ServiceResult::Success)
    }
}

/// Stub membership service.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubUserRoleService;

#[async_trait]
impl UserRoleService for StubUserRoleService {
    async fn add_to_role(
        &self,
        user_id: &str,
        role_name: &str,
    ) -> Result<ServiceResult, ServiceError> {
        tracing::trace!(user_id, role_name, "stub add to role");
        Ok(ServiceResult::Success)
    }

    async fn roles_for_user(&self, _user_id: &str) -> Result<Vec<Role>, ServiceError> {
        Ok(Vec::new())
    }

    async fn users_in_role(&self, _role_name: &str) -> Result<Vec<User>, ServiceError> {
        Ok(Vec::new())
    }

    async fn remove_from_role(
        &self,
        user_id: &str,
        role_name: &str,
    ) -> Result<ServiceResult, ServiceError> {
        tracing::trace!(user_id, role_name, "stub remove from role");
        Ok(ServiceResult::Success)
    }
}

/// Stub claim service.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubUserClaimService;

#[async_trait]
impl UserClaimService for StubUserClaimService {
    async fn add_claims(
        &self,
        user_id: &str,
        claims: &[Claim],
    ) -> Result<ServiceResult, ServiceError> {
        tracing::trace!(user_id, count = claims.len(), "stub add claims");
        Ok(ServiceResult::Success)
    }

    async fn claims_for_user(&self, _user_id: &str) -> Result<Vec<Claim>, ServiceError> {
        Ok(Vec::new())
    }

    async fn users_for_claim(&self, _claim: &Claim) -> Result<Vec<User>, ServiceError> {
        Ok(Vec::new())
    }

    async fn replace_claim(
        &self,
        user_id: &str,
        claim: &Claim,
        new_claim: &Claim,
    ) -> Result<ServiceResult, ServiceError> {
        tracing::trace!(user_id, %claim, %new_claim, "stub replace claim");
        Ok(ServiceResult::Success)
    }

    async fn remove_claim(
        &self,
        user_id: &str,
        claim: &Claim,
    ) -> Result<ServiceResult, ServiceError> {
        tracing::trace!(user_id, %claim, "stub remove claim");
        Ok(ServiceResult::Success)
    }
}
