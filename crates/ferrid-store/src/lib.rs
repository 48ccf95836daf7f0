//! # ferrid-store
//!
//! Identity user and role stores for an authentication layer.
//!
//! The stores satisfy the storage capability traits in [`traits`] and
//! delegate persistence to the services in `ferrid-service`. They add no
//! storage of their own; their job is translating service outcomes into the
//! caller's vocabulary:
//!
//! | Operation | Service failure | Service fault |
//! |-----------|-----------------|---------------|
//! | create / update / delete | `Err`, code `2000` (user) or `1000` (role) | `Err` with the fault's message and [`ErrorKind`](ferrid_core::ErrorKind) |
//! | find by id / name / email | n/a | logged, `None` |
//! | role and claim changes | logged | logged |
//! | listings | n/a | logged, empty |
//! | external logins | always `Err` with kind `Unsupported` | |
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ferrid_core::{IdentityConfig, User};
//! use ferrid_service::create_backend;
//! use ferrid_store::{CustomUserStore, UserLockoutStore, UserStore};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IdentityConfig::load()?;
//! let store = CustomUserStore::from_backend(&create_backend(&config)?);
//! let cancel = CancellationToken::new();
//!
//! let mut user = User::new("alice", "alice@example.com");
//! store.create(&user, &cancel).await?;
//!
//! store.increment_access_failed_count(&mut user);
//! store.update(&user, &cancel).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod lockout;
mod outcome;
pub mod role_store;
pub mod traits;
pub mod user_store;

pub use error::{Entity, IdentityError, IdentityResult, ROLE_ERROR_CODE, USER_ERROR_CODE};
pub use lockout::LockoutPolicy;
pub use role_store::CustomRoleStore;
pub use traits::{
    RoleStore, UserClaimStore, UserEmailStore, UserLockoutStore, UserLoginStore,
    UserPasswordStore, UserRoleStore, UserSecurityStampStore, UserStore,
};
pub use user_store::CustomUserStore;
