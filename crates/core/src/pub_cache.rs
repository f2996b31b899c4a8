//! Pub cache package discovery
//!
//! Flutter keeps hosted packages under `<pub_cache>/hosted/pub.dev/<name>-<version>`.
//! Several versions of the same package may be installed side by side, so a
//! prefix lookup returns every matching folder.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// A package folder found in the pub cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDir {
    /// Prefix the folder matched
    pub prefix: String,
    /// Folder name, e.g. `path_provider_android-2.2.4`
    pub name: String,
    /// Absolute folder path
    pub path: PathBuf,
}

/// Default pub cache root for this machine.
///
/// Honors `PUB_CACHE`, then falls back to `%LOCALAPPDATA%\Pub\Cache` on
/// Windows and `~/.pub-cache` elsewhere.
pub fn default_root() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("PUB_CACHE").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }

    if cfg!(windows) {
        dirs::data_local_dir().map(|d| d.join("Pub").join("Cache"))
    } else {
        dirs::home_dir().map(|h| h.join(".pub-cache"))
    }
}

/// View over the hosted packages of one pub cache
#[derive(Debug, Clone)]
pub struct PubCache {
    hosted: PathBuf,
}

impl PubCache {
    /// Create a view over `<root>/hosted/pub.dev`
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            hosted: root.as_ref().join("hosted").join("pub.dev"),
        }
    }

    /// Directory holding the package folders
    pub fn hosted_dir(&self) -> &Path {
        &self.hosted
    }

    /// Collect every package folder whose name starts with `<prefix>-` for
    /// any of the given prefixes. Each folder is returned at most once, in
    /// name order.
    pub fn find_packages<S: AsRef<str>>(&self, prefixes: &[S]) -> Result<Vec<PackageDir>> {
        let mut entries: Vec<(String, PathBuf)> = std::fs::read_dir(&self.hosted)
            .map_err(|e| Error::pub_cache(&self.hosted).with_source(e))?
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|e| (e.file_name().to_string_lossy().to_string(), e.path()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut packages = Vec::new();
        for (name, path) in entries {
            let matched = prefixes
                .iter()
                .map(AsRef::as_ref)
                .find(|prefix| name.starts_with(&format!("{}-", prefix)));

            if let Some(prefix) = matched {
                packages.push(PackageDir {
                    prefix: prefix.to_string(),
                    name,
                    path,
                });
            }
        }

        tracing::debug!(
            hosted = %self.hosted.display(),
            found = packages.len(),
            "Scanned pub cache"
        );

        Ok(packages)
    }

    /// First folder for `prefix` (in name order) that contains `relative`.
    pub fn find_package_file(&self, prefix: &str, relative: &Path) -> Result<Option<PathBuf>> {
        let file = self
            .find_packages(&[prefix])?
            .into_iter()
            .map(|pkg| pkg.path.join(relative))
            .find(|candidate| candidate.is_file());

        Ok(file)
    }
}
