//! Storage capability contracts.
//!
//! An authentication layer talks to its persistence through these narrow
//! traits. A store implements whichever capabilities it supports; the
//! [`CustomUserStore`](crate::CustomUserStore) implements all user
//! capabilities and [`CustomRoleStore`](crate::CustomRoleStore) implements
//! [`RoleStore`].
//!
//! Operations that reach a service are async and take a
//! [`CancellationToken`]. Field accessors only touch the record in hand; the
//! change is persisted by a later `update`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ferrid_core::{Claim, LoginInfo, Role, User};
use tokio_util::sync::CancellationToken;

use crate::error::{IdentityError, IdentityResult};

/// Core user record storage.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &User, cancel: &CancellationToken) -> IdentityResult;

    async fn update(&self, user: &User, cancel: &CancellationToken) -> IdentityResult;

    async fn delete(&self, user: &User, cancel: &CancellationToken) -> IdentityResult;

    async fn find_by_id(&self, user_id: &str, cancel: &CancellationToken) -> Option<User>;

    async fn find_by_name(
        &self,
        normalized_user_name: &str,
        cancel: &CancellationToken,
    ) -> Option<User>;

    fn user_id<'u>(&self, user: &'u User) -> &'u str;

    fn user_name<'u>(&self, user: &'u User) -> &'u str;

    fn set_user_name(&self, user: &mut User, user_name: &str);

    fn normalized_user_name<'u>(&self, user: &'u User) -> &'u str;

    fn set_normalized_user_name(&self, user: &mut User, normalized_name: &str);
}

/// External login provider associations.
#[async_trait]
pub trait UserLoginStore: Send + Sync {
    async fn add_login(
        &self,
        user: &User,
        login: &LoginInfo,
        cancel: &CancellationToken,
    ) -> IdentityResult;

    async fn remove_login(
        &self,
        user: &User,
        login_provider: &str,
        provider_key: &str,
        cancel: &CancellationToken,
    ) -> IdentityResult;

    async fn find_by_login(
        &self,
        login_provider: &str,
        provider_key: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<User>, IdentityError>;

    async fn logins(
        &self,
        user: &User,
        cancel: &CancellationToken,
    ) -> Result<Vec<LoginInfo>, IdentityError>;
}

/// Password hash access.
pub trait UserPasswordStore: Send + Sync {
    fn set_password_hash(&self, user: &mut User, password_hash: Option<String>);

    fn password_hash<'u>(&self, user: &'u User) -> Option<&'u str>;

    /// Whether the user has a non-empty password hash.
    fn has_password(&self, user: &User) -> bool;
}

/// Security stamp access.
pub trait UserSecurityStampStore: Send + Sync {
    fn set_security_stamp(&self, user: &mut User, stamp: &str);

    fn security_stamp<'u>(&self, user: &'u User) -> Option<&'u str>;
}

/// Role membership.
#[async_trait]
pub trait UserRoleStore: Send + Sync {
    async fn add_to_role(&self, user: &User, role_name: &str, cancel: &CancellationToken);

    async fn remove_from_role(&self, user: &User, role_name: &str, cancel: &CancellationToken);

    /// Names of the roles the user belongs to.
    async fn roles(&self, user: &User, cancel: &CancellationToken) -> Vec<String>;

    async fn is_in_role(&self, user: &User, role_name: &str, cancel: &CancellationToken) -> bool;

    async fn users_in_role(&self, role_name: &str, cancel: &CancellationToken) -> Vec<User>;
}

/// Claims management.
#[async_trait]
pub trait UserClaimStore: Send + Sync {
    async fn claims(&self, user: &User, cancel: &CancellationToken) -> Vec<Claim>;

    async fn add_claims(&self, user: &User, claims: &[Claim], cancel: &CancellationToken);

    async fn replace_claim(
        &self,
        user: &User,
        claim: &Claim,
        new_claim: &Claim,
        cancel: &CancellationToken,
    );

    async fn remove_claims(&self, user: &User, claims: &[Claim], cancel: &CancellationToken);

    async fn users_for_claim(&self, claim: &Claim, cancel: &CancellationToken) -> Vec<User>;
}

/// Email access.
#[async_trait]
pub trait UserEmailStore: Send + Sync {
    fn set_email(&self, user: &mut User, email: &str);

    fn email<'u>(&self, user: &'u User) -> &'u str;

    fn email_confirmed(&self, user: &User) -> bool;

    fn set_email_confirmed(&self, user: &mut User, confirmed: bool);

    async fn find_by_email(
        &self,
        normalized_email: &str,
        cancel: &CancellationToken,
    ) -> Option<User>;

    fn normalized_email<'u>(&self, user: &'u User) -> &'u str;

    fn set_normalized_email(&self, user: &mut User, normalized_email: &str);
}

/// Lockout state and the failed-access counter.
pub trait UserLockoutStore: Send + Sync {
    fn lockout_end(&self, user: &User) -> Option<DateTime<Utc>>;

    fn set_lockout_end(&self, user: &mut User, lockout_end: Option<DateTime<Utc>>);

    /// Increment the counter and return the new value.
    fn increment_access_failed_count(&self, user: &mut User) -> u32;

    fn reset_access_failed_count(&self, user: &mut User);

    fn access_failed_count(&self, user: &User) -> u32;

    fn lockout_enabled(&self, user: &User) -> bool;

    fn set_lockout_enabled(&self, user: &mut User, enabled: bool);
}

/// Role record storage.
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn create(&self, role: &Role, cancel: &CancellationToken) -> IdentityResult;

    async fn update(&self, role: &Role, cancel: &CancellationToken) -> IdentityResult;

    async fn delete(&self, role: &Role, cancel: &CancellationToken) -> IdentityResult;

    async fn find_by_id(&self, role_id: &str, cancel: &CancellationToken) -> Option<Role>;

    async fn find_by_name(
        &self,
        normalized_role_name: &str,
        cancel: &CancellationToken,
    ) -> Option<Role>;

    fn role_id<'r>(&self, role: &'r Role) -> &'r str;

    fn role_name<'r>(&self, role: &'r Role) -> &'r str;

    fn set_role_name(&self, role: &mut Role, role_name: &str);

    fn normalized_role_name<'r>(&self, role: &'r Role) -> &'r str;

    fn set_normalized_role_name(&self, role: &mut Role, normalized_name: &str);
}
