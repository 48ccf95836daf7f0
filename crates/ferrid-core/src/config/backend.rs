//! Persistence backend selection.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which service implementation backs the stores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Canned responses, no storage.
    #[default]
    Stub,
    /// Process-local maps.
    Memory,
    /// JSON snapshot on disk.
    File,
}

/// Backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,

    /// Snapshot path (for the file backend).
    #[serde(default)]
    pub path: Option<PathBuf>,
}
