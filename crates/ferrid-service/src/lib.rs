//! # ferrid-service
//!
//! Persistence services behind the ferrid identity stores.
//!
//! The store adapter never touches storage directly. It calls four narrow
//! service contracts, and this crate provides them along with three
//! implementations:
//!
//! | Backend | Behavior |
//! |---------|----------|
//! | `stub` | No storage; canned success and empty results |
//! | `memory` | Process-local maps with uniqueness checks |
//! | `file` | The memory backend plus a JSON snapshot rewritten on every change |
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ferrid_core::IdentityConfig;
//! use ferrid_service::{UserService, create_backend};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IdentityConfig::load()?;
//! let backend = create_backend(&config)?;
//!
//! let user = backend.users.find("u1").await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod factory;
pub mod file;
pub mod memory;
pub mod service;
pub mod stub;

pub use error::ServiceError;
pub use factory::{Backend, create_backend};
pub use file::FileBackend;
pub use memory::{IdentityState, MemoryBackend};
pub use service::{RoleService, ServiceResult, UserClaimService, UserRoleService, UserService};
pub use stub::{StubRoleService, StubUserClaimService, StubUserRoleService, StubUserService};
