//! One-time `.bak` copies
//!
//! A backup is written once and never refreshed, so it keeps the content the
//! file had before it was first patched.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// What happened when a backup was requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupStatus {
    /// A fresh copy was written
    Created(PathBuf),
    /// A copy from an earlier run was kept
    AlreadyExists(PathBuf),
    /// Nothing to back up
    SourceMissing,
}

/// `<path>.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

/// Copy `path` to `<path>.bak` unless that copy already exists.
pub fn create_backup(path: &Path) -> Result<BackupStatus> {
    if !path.is_file() {
        tracing::info!(path = %path.display(), "File not found, no backup taken");
        return Ok(BackupStatus::SourceMissing);
    }

    let backup = backup_path(path);
    if backup.exists() {
        tracing::info!(backup = %backup.display(), "Backup already exists");
        return Ok(BackupStatus::AlreadyExists(backup));
    }

    std::fs::copy(path, &backup).map_err(|e| Error::backup(path).with_source(e))?;
    tracing::info!(path = %path.display(), backup = %backup.display(), "Backed up");
    Ok(BackupStatus::Created(backup))
}
