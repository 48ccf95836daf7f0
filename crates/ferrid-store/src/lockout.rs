//! Failed sign-in tracking and account lockout.
//!
//! The policy only edits the record through [`UserLockoutStore`]; callers
//! persist the result with `UserStore::update`.

use chrono::{DateTime, Utc};
use ferrid_core::{IdentityConfig, LockoutOptions, User};

use crate::traits::UserLockoutStore;

/// Applies [`LockoutOptions`] to user records.
#[derive(Debug, Clone, Default)]
pub struct LockoutPolicy {
    options: LockoutOptions,
}

impl LockoutPolicy {
    pub fn new(options: LockoutOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &IdentityConfig) -> Self {
        Self::new(config.lockout.clone())
    }

    pub fn options(&self) -> &LockoutOptions {
        &self.options
    }

    /// Initialize lockout settings on a newly created user.
    pub fn apply_defaults<S>(&self, store: &S, user: &mut User)
    where
        S: UserLockoutStore + ?Sized,
    {
        store.set_lockout_enabled(user, self.options.allowed_for_new_users);
    }

    /// Whether the user is locked out at `now`.
    pub fn is_locked_out<S>(&self, store: &S, user: &User, now: DateTime<Utc>) -> bool
    where
        S: UserLockoutStore + ?Sized,
    {
        store.lockout_enabled(user) && store.lockout_end(user).is_some_and(|end| end > now)
    }

    /// Record a failed sign-in. Returns `true` if this failure locked the
    /// account.
    pub fn record_failure<S>(&self, store: &S, user: &mut User, now: DateTime<Utc>) -> bool
    where
        S: UserLockoutStore + ?Sized,
    {
        if !store.lockout_enabled(user) {
            return false;
        }

        let count = store.increment_access_failed_count(user);
        if count < self.options.max_failed_access_attempts {
            tracing::debug!(user_id = %user.id, count, "Recorded failed access");
            return false;
        }

        let until = now
            .checked_add_signed(self.options.default_lockout())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        store.set_lockout_end(user, Some(until));
        store.reset_access_failed_count(user);

        tracing::info!(user_id = %user.id, until = %until, "User locked out");
        true
    }

    /// Record a successful sign-in.
    pub fn record_success<S>(&self, store: &S, user: &mut User)
    where
        S: UserLockoutStore + ?Sized,
    {
        store.reset_access_failed_count(user);
    }
}
