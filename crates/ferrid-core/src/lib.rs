//! # ferrid-core
//!
//! Shared types for the ferrid identity store.
//!
//! This crate provides:
//! - The identity records passed through every store operation ([`User`], [`Role`],
//!   [`Claim`], [`LoginInfo`])
//! - The lookup normalizer applied to user names, emails and role names
//! - The [`ErrorKind`] taxonomy shared by the service and store layers
//! - YAML configuration ([`IdentityConfig`])

pub mod config;
pub mod error;
pub mod models;
pub mod normalize;

pub use config::{
    BackendConfig, BackendKind, ConfigError, IdentityConfig, LockoutOptions, PasswordOptions,
    PasswordViolation, UserOptions,
};
pub use error::ErrorKind;
pub use models::{Claim, LoginInfo, Role, User};
pub use normalize::normalize;
