//! Host platform capabilities the bridge depends on
//!
//! The real implementation lives on the device side (package manager,
//! file provider, activity launcher). Keeping it behind a trait leaves the
//! validation and orchestration in [`super::InstallBridge`] testable.

use super::intent::Intent;
use std::path::Path;
use thiserror::Error;

/// Failure reported by the host platform
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub trait InstallHost {
    /// Package name of the running application
    fn package_name(&self) -> &str;

    /// Platform SDK level
    fn sdk_version(&self) -> u32;

    /// Package that installed `package`; `None` when side-loaded
    fn installer_package_name(&self, package: &str) -> Result<Option<String>, HostError>;

    fn file_exists(&self, path: &Path) -> bool;

    /// Content URI for `path` through the file provider registered under `authority`
    fn content_uri(&self, authority: &str, path: &Path) -> Result<String, HostError>;

    /// Whether some activity can handle `intent`
    fn resolves(&self, intent: &Intent) -> bool;

    fn start_activity(&self, intent: &Intent) -> Result<(), HostError>;
}
