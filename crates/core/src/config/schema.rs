//! Configuration schema definitions
//!
//! Shared configuration types for the Android and iOS patchers.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub android: AndroidConfig,

    #[serde(default)]
    pub ios: IosConfig,
}

/// Filesystem locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Pub cache root (the directory holding `hosted/`).
    /// Falls back to `PUB_CACHE` or the platform default when unset.
    #[serde(default)]
    pub pub_cache: Option<String>,

    /// Flutter project root (the directory holding `ios/` and `android/`)
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            pub_cache: None,
            project_root: default_project_root(),
        }
    }
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

/// Gradle Java-version fix configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AndroidConfig {
    /// Package name prefixes to look for in the pub cache
    #[serde(default = "default_android_packages")]
    pub packages: Vec<String>,

    /// `JavaVersion` constant every build.gradle should end up on
    #[serde(default = "default_target_java_version")]
    pub target_java_version: String,

    /// `JavaVersion` constants to rewrite to the target
    #[serde(default = "default_legacy_java_versions")]
    pub legacy_java_versions: Vec<String>,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            packages: default_android_packages(),
            target_java_version: default_target_java_version(),
            legacy_java_versions: default_legacy_java_versions(),
        }
    }
}

fn default_android_packages() -> Vec<String> {
    vec![
        "shared_preferences_android",
        "path_provider_android",
        "record_android",
        "flutter_plugin_android_lifecycle",
        "url_launcher_android",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_target_java_version() -> String {
    "VERSION_1_8".to_string()
}

fn default_legacy_java_versions() -> Vec<String> {
    vec!["VERSION_11".to_string(), "VERSION_17".to_string()]
}

/// iOS pod and plugin fix configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IosConfig {
    /// Keep a `.bak` copy of each file before its first patch
    #[serde(default = "default_true")]
    pub backup: bool,

    /// Package prefix holding RecordConfig.swift
    #[serde(default = "default_record_package")]
    pub record_package: String,
}

impl Default for IosConfig {
    fn default() -> Self {
        Self {
            backup: true,
            record_package: default_record_package(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_record_package() -> String {
    "record_darwin".to_string()
}
