//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use crate::pub_cache;
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }

    /// Resolve the pub cache root: explicit setting first, then convention.
    pub fn pub_cache_root(&self) -> Option<PathBuf> {
        match &self.schema.paths.pub_cache {
            Some(raw) => Some(PathBuf::from(shellexpand::tilde(raw).into_owned())),
            None => pub_cache::default_root(),
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        ".findeasy-tools.toml",
        "findeasy-tools.toml",
        ".config/findeasy-tools.toml",
    ];

    candidates
        .iter()
        .map(Path::new)
        .find(|p| p.exists())
        .map(Path::to_path_buf)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    let schema: ConfigSchema = toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("While loading {}", path.display()))?;
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.android.packages.len(), 5);
        assert_eq!(config.schema.android.target_java_version, "VERSION_1_8");
        assert!(config.schema.ios.backup);
    }

    #[test]
    fn test_config_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/findeasy-tools.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("findeasy-tools.toml");
        std::fs::write(
            &path,
            r#"
[paths]
pub_cache = "/opt/pub"

[android]
packages = ["record_android"]
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.schema.android.packages, vec!["record_android"]);
        assert_eq!(
            config.schema.android.legacy_java_versions,
            vec!["VERSION_11", "VERSION_17"]
        );
        assert_eq!(config.pub_cache_root(), Some(PathBuf::from("/opt/pub")));
        assert_eq!(config.schema.ios.record_package, "record_darwin");
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("findeasy-tools.toml");
        std::fs::write(&path, "[android\npackages = 1").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }
}
