//! User store backed by injected services.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ferrid_core::{Claim, LoginInfo, User};
use ferrid_service::{Backend, ServiceResult, UserClaimService, UserRoleService, UserService};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::error::{Entity, IdentityError, IdentityResult};
use crate::outcome::{complete, found, guarded, listed};
use crate::traits::{
    UserClaimStore, UserEmailStore, UserLockoutStore, UserLoginStore, UserPasswordStore,
    UserRoleStore, UserSecurityStampStore, UserStore,
};

const EXTERNAL_LOGINS: &str = "external logins";

/// Implements every user capability by delegating to three services.
///
/// Failure policy differs by category:
/// - create, update and delete surface failures as [`IdentityError`]s
/// - lookups and listings log faults and report "nothing found"
/// - role and claim changes are best-effort; failures are logged only
/// - external logins are not supported at all
#[derive(Clone)]
pub struct CustomUserStore {
    users: Arc<dyn UserService>,
    user_roles: Arc<dyn UserRoleService>,
    user_claims: Arc<dyn UserClaimService>,
}

impl CustomUserStore {
    pub fn new(
        users: Arc<dyn UserService>,
        user_roles: Arc<dyn UserRoleService>,
        user_claims: Arc<dyn UserClaimService>,
    ) -> Self {
        Self {
            users,
            user_roles,
            user_claims,
        }
    }

    /// Wire the store to a configured backend.
    pub fn from_backend(backend: &Backend) -> Self {
        Self::new(
            backend.users.clone(),
            backend.user_roles.clone(),
            backend.user_claims.clone(),
        )
    }
}

impl std::fmt::Debug for CustomUserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomUserStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl UserStore for CustomUserStore {
    async fn create(&self, user: &User, cancel: &CancellationToken) -> IdentityResult {
        let outcome = guarded(cancel, self.users.create(user)).await;
        complete(Entity::User, "create", &user.id, outcome)
    }

    async fn update(&self, user: &User, cancel: &CancellationToken) -> IdentityResult {
        let outcome = guarded(cancel, self.users.update(user)).await;
        complete(Entity::User, "update", &user.id, outcome)
    }

    async fn delete(&self, user: &User, cancel: &CancellationToken) -> IdentityResult {
        let outcome = guarded(cancel, self.users.delete(&user.id)).await;
        complete(Entity::User, "delete", &user.id, outcome)
    }

    async fn find_by_id(&self, user_id: &str, cancel: &CancellationToken) -> Option<User> {
        found(
            "find_by_id",
            user_id,
            guarded(cancel, self.users.find(user_id)).await,
        )
    }

    async fn find_by_name(
        &self,
        normalized_user_name: &str,
        cancel: &CancellationToken,
    ) -> Option<User> {
        found(
            "find_by_name",
            normalized_user_name,
            guarded(cancel, self.users.find_by_user_name(normalized_user_name)).await,
        )
    }

    fn user_id<'u>(&self, user: &'u User) -> &'u str {
        &user.id
    }

    fn user_name<'u>(&self, user: &'u User) -> &'u str {
        &user.user_name
    }

    fn set_user_name(&self, user: &mut User, user_name: &str) {
        user.user_name = user_name.to_string();
    }

    fn normalized_user_name<'u>(&self, user: &'u User) -> &'u str {
        &user.normalized_user_name
    }

    fn set_normalized_user_name(&self, user: &mut User, normalized_name: &str) {
        user.normalized_user_name = normalized_name.to_string();
    }
}

#[async_trait]
impl UserLoginStore for CustomUserStore {
    async fn add_login(
        &self,
        _user: &User,
        _login: &LoginInfo,
        _cancel: &CancellationToken,
    ) -> IdentityResult {
        Err(IdentityError::unsupported(Entity::User, EXTERNAL_LOGINS))
    }

    async fn remove_login(
        &self,
        _user: &User,
        _login_provider: &str,
        _provider_key: &str,
        _cancel: &CancellationToken,
    ) -> IdentityResult {
        Err(IdentityError::unsupported(Entity::User, EXTERNAL_LOGINS))
    }

    async fn find_by_login(
        &self,
        _login_provider: &str,
        _provider_key: &str,
        _cancel: &CancellationToken,
    ) -> Result<Option<User>, IdentityError> {
        Err(IdentityError::unsupported(Entity::User, EXTERNAL_LOGINS))
    }

    async fn logins(
        &self,
        _user: &User,
        _cancel: &CancellationToken,
    ) -> Result<Vec<LoginInfo>, IdentityError> {
        Err(IdentityError::unsupported(Entity::User, EXTERNAL_LOGINS))
    }
}

impl UserPasswordStore for CustomUserStore {
    fn set_password_hash(&self, user: &mut User, password_hash: Option<String>) {
        user.password_hash = password_hash;
    }

    fn password_hash<'u>(&self, user: &'u User) -> Option<&'u str> {
        user.password_hash.as_deref()
    }

    fn has_password(&self, user: &User) -> bool {
        user.password_hash.as_deref().is_some_and(|h| !h.is_empty())
    }
}

impl UserSecurityStampStore for CustomUserStore {
    fn set_security_stamp(&self, user: &mut User, stamp: &str) {
        user.security_stamp = Some(stamp.to_string());
    }

    fn security_stamp<'u>(&self, user: &'u User) -> Option<&'u str> {
        user.security_stamp.as_deref()
    }
}

#[async_trait]
impl UserRoleStore for CustomUserStore {
    async fn add_to_role(&self, user: &User, role_name: &str, cancel: &CancellationToken) {
        match guarded(cancel, self.user_roles.add_to_role(&user.id, role_name)).await {
            Ok(ServiceResult::Success) => {}
            Ok(ServiceResult::Failure) => {
                tracing::warn!(user_id = %user.id, role = role_name, "Unsuccessful adding role to user");
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, role = role_name, error = %e, "Failed to add role to user");
            }
        }
    }

    async fn remove_from_role(&self, user: &User, role_name: &str, cancel: &CancellationToken) {
        match guarded(cancel, self.user_roles.remove_from_role(&user.id, role_name)).await {
            Ok(ServiceResult::Success) => {}
            Ok(ServiceResult::Failure) => {
                tracing::warn!(user_id = %user.id, role = role_name, "Unsuccessful removing role from user");
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, role = role_name, error = %e, "Failed to remove role from user");
            }
        }
    }

    async fn roles(&self, user: &User, cancel: &CancellationToken) -> Vec<String> {
        let roles = listed(
            "roles",
            &user.id,
            guarded(cancel, self.user_roles.roles_for_user(&user.id)).await,
        );
        roles.into_iter().map(|r| r.name).collect()
    }

    async fn is_in_role(&self, user: &User, role_name: &str, cancel: &CancellationToken) -> bool {
        let roles = listed(
            "is_in_role",
            &user.id,
            guarded(cancel, self.user_roles.roles_for_user(&user.id)).await,
        );
        let wanted = ferrid_core::normalize(role_name);
        roles
            .iter()
            .any(|r| ferrid_core::normalize(&r.name) == wanted)
    }

    async fn users_in_role(&self, role_name: &str, cancel: &CancellationToken) -> Vec<User> {
        listed(
            "users_in_role",
            role_name,
            guarded(cancel, self.user_roles.users_in_role(role_name)).await,
        )
    }
}

#[async_trait]
impl UserClaimStore for CustomUserStore {
    async fn claims(&self, user: &User, cancel: &CancellationToken) -> Vec<Claim> {
        listed(
            "claims",
            &user.id,
            guarded(cancel, self.user_claims.claims_for_user(&user.id)).await,
        )
    }

    async fn add_claims(&self, user: &User, claims: &[Claim], cancel: &CancellationToken) {
        match guarded(cancel, self.user_claims.add_claims(&user.id, claims)).await {
            Ok(ServiceResult::Success) => {}
            Ok(ServiceResult::Failure) => {
                let values: Vec<&str> = claims.iter().map(|c| c.value.as_str()).collect();
                tracing::warn!(
                    user_id = %user.id,
                    claims = %values.join(","),
                    "Unsuccessful adding claims to user"
                );
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Failed to add claims to user");
            }
        }
    }

    async fn replace_claim(
        &self,
        user: &User,
        claim: &Claim,
        new_claim: &Claim,
        cancel: &CancellationToken,
    ) {
        let call = self.user_claims.replace_claim(&user.id, claim, new_claim);
        match guarded(cancel, call).await {
            Ok(ServiceResult::Success) => {}
            Ok(ServiceResult::Failure) => {
                tracing::warn!(
                    user_id = %user.id,
                    %claim,
                    %new_claim,
                    "Unsuccessful replacing claim"
                );
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, %claim, error = %e, "Failed to replace claim");
            }
        }
    }

    async fn remove_claims(&self, user: &User, claims: &[Claim], cancel: &CancellationToken) {
        for claim in claims {
            match guarded(cancel, self.user_claims.remove_claim(&user.id, claim)).await {
                Ok(ServiceResult::Success) => {}
                Ok(ServiceResult::Failure) => {
                    tracing::warn!(user_id = %user.id, %claim, "Unsuccessful removing claim from user");
                }
                Err(e) => {
                    // Remaining claims are left untouched after a fault.
                    tracing::error!(user_id = %user.id, %claim, error = %e, "Failed to remove claim");
                    return;
                }
            }
        }
    }

    async fn users_for_claim(&self, claim: &Claim, cancel: &CancellationToken) -> Vec<User> {
        listed(
            "users_for_claim",
            &claim.to_string(),
            guarded(cancel, self.user_claims.users_for_claim(claim)).await,
        )
    }
}

#[async_trait]
impl UserEmailStore for CustomUserStore {
    fn set_email(&self, user: &mut User, email: &str) {
        user.email = email.to_string();
    }

    fn email<'u>(&self, user: &'u User) -> &'u str {
        &user.email
    }

    fn email_confirmed(&self, user: &User) -> bool {
        user.email_confirmed
    }

    fn set_email_confirmed(&self, user: &mut User, confirmed: bool) {
        user.email_confirmed = confirmed;
    }

    async fn find_by_email(
        &self,
        normalized_email: &str,
        cancel: &CancellationToken,
    ) -> Option<User> {
        found(
            "find_by_email",
            normalized_email,
            guarded(cancel, self.users.find_by_email(normalized_email)).await,
        )
    }

    fn normalized_email<'u>(&self, user: &'u User) -> &'u str {
        &user.normalized_email
    }

    fn set_normalized_email(&self, user: &mut User, normalized_email: &str) {
        user.normalized_email = normalized_email.to_string();
    }
}

impl UserLockoutStore for CustomUserStore {
    fn lockout_end(&self, user: &User) -> Option<DateTime<Utc>> {
        user.lockout_end
    }

    fn set_lockout_end(&self, user: &mut User, lockout_end: Option<DateTime<Utc>>) {
        user.lockout_end = lockout_end;
    }

    fn increment_access_failed_count(&self, user: &mut User) -> u32 {
        user.access_failed_count = user.access_failed_count.saturating_add(1);
        user.access_failed_count
    }

    fn reset_access_failed_count(&self, user: &mut User) {
        user.access_failed_count = 0;
    }

    fn access_failed_count(&self, user: &User) -> u32 {
        user.access_failed_count
    }

    fn lockout_enabled(&self, user: &User) -> bool {
        user.lockout_enabled
    }

    fn set_lockout_enabled(&self, user: &mut User, enabled: bool) {
        user.lockout_enabled = enabled;
    }
}
