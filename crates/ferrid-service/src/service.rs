//! Service contracts the identity stores delegate to.
//!
//! Each trait is a narrow CRUD or association contract keyed by string ids.
//! A mutating call has three outcomes: `Ok(ServiceResult::Success)`,
//! `Ok(ServiceResult::Failure)` when the service declined, or `Err(_)` on a
//! fault.

use async_trait::async_trait;
use ferrid_core::{Claim, Role, User};

use crate::error::ServiceError;

/// Outcome of a mutating service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceResult {
    Success,
    Failure,
}

impl ServiceResult {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// User record persistence.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn create(&self, user: &User) -> Result<ServiceResult, ServiceError>;

    async fn find(&self, user_id: &str) -> Result<Option<User>, ServiceError>;

    async fn find_by_user_name(
        &self,
        normalized_user_name: &str,
    ) -> Result<Option<User>, ServiceError>;

    async fn find_by_email(&self, normalized_email: &str) -> Result<Option<User>, ServiceError>;

    async fn update(&self, user: &User) -> Result<ServiceResult, ServiceError>;

    async fn delete(&self, user_id: &str) -> Result<ServiceResult, ServiceError>;
}

/// Role record persistence.
#[async_trait]
pub trait RoleService: Send + Sync {
    async fn create(&self, role: &Role) -> Result<ServiceResult, ServiceError>;

    async fn find(&self, role_id: &str) -> Result<Option<Role>, ServiceError>;

    async fn find_by_name(&self, normalized_name: &str) -> Result<Option<Role>, ServiceError>;

    async fn update(&self, role: &Role) -> Result<ServiceResult, ServiceError>;

    async fn delete(&self, role_id: &str) -> Result<ServiceResult, ServiceError>;
}

/// User-to-role membership.
#[async_trait]
pub trait UserRoleService: Send + Sync {
    async fn add_to_role(&self, user_id: &str, role_name: &str)
    -> Result<ServiceResult, ServiceError>;

    async fn roles_for_user(&self, user_id: &str) -> Result<Vec<Role>, ServiceError>;

    async fn users_in_role(&self, role_name: &str) -> Result<Vec<User>, ServiceError>;

    async fn remove_from_role(
        &self,
        user_id: &str,
        role_name: &str,
    ) -> Result<ServiceResult, ServiceError>;
}

/// Claims held by users.
#[async_trait]
pub trait UserClaimService: Send + Sync {
    async fn add_claims(&self, user_id: &str, claims: &[Claim])
    -> Result<ServiceResult, ServiceError>;

    async fn claims_for_user(&self, user_id: &str) -> Result<Vec<Claim>, ServiceError>;

    async fn users_for_claim(&self, claim: &Claim) -> Result<Vec<User>, ServiceError>;

    async fn replace_claim(
        &self,
        user_id: &str,
        claim: &Claim,
        new_claim: &Claim,
    ) -> Result<ServiceResult, ServiceError>;

    async fn remove_claim(&self, user_id: &str, claim: &Claim)
    -> Result<ServiceResult, ServiceError>;
}
