//! Java target fix for Flutter plugin build files
//!
//! Some hosted Android plugins pin `JavaVersion.VERSION_11`/`VERSION_17` and a
//! matching Kotlin `jvmTarget`, which breaks builds on an older JDK with
//! errors like:
//!
//! ```text
//! Execution failed for task ':flutter_plugin_android_lifecycle:compileReleaseJavaWithJavac'.
//! ```
//!
//! This rewrites `android/build.gradle` in every installed version of the
//! configured plugins so they all target one Java version.

use findeasy_core::config::AndroidConfig;
use findeasy_core::error::Result;
use findeasy_core::patch::{CaptureRule, FilePatch, PatchReport, RegexRule};
use findeasy_core::pub_cache::{PackageDir, PubCache};
use std::path::{Path, PathBuf};

/// Build file location inside a plugin package
pub const BUILD_GRADLE: &str = "android/build.gradle";

// The value ends at the line break or the closing brace, so other
// settings in the same block survive.
const KOTLIN_OPTIONS_PATTERN: &str = r"kotlinOptions\s*\{\s*jvmTarget\s*=\s*([^}\n]+)";

/// Packages that were scanned and what happened to their build files
#[derive(Debug, Clone, Default)]
pub struct GradleFixRun {
    pub packages: Vec<PackageDir>,
    pub report: PatchReport,
}

/// Gradle Java-version fixer
#[derive(Debug, Clone)]
pub struct GradleFix {
    packages: Vec<String>,
    target_java_version: String,
    legacy_java_versions: Vec<String>,
    dry_run: bool,
}

impl GradleFix {
    pub fn from_config(config: &AndroidConfig) -> Self {
        Self {
            packages: config.packages.clone(),
            target_java_version: config.target_java_version.clone(),
            legacy_java_versions: config.legacy_java_versions.clone(),
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// `JavaVersion.<target>`
    pub fn target(&self) -> String {
        format!("JavaVersion.{}", self.target_java_version)
    }

    /// Rules applied to each build.gradle
    pub fn file_patch(&self) -> Result<FilePatch> {
        let target = self.target();
        let mut patch = FilePatch::new("build.gradle").dry_run(self.dry_run);

        for legacy in &self.legacy_java_versions {
            if *legacy == self.target_java_version {
                continue;
            }
            patch = patch.with_rule(RegexRule::literal(
                format!("java-{}", legacy),
                &format!("JavaVersion.{}", legacy),
                target.clone(),
            )?);
        }

        Ok(patch.with_rule(CaptureRule::new(
            "kotlin-jvm-target",
            KOTLIN_OPTIONS_PATTERN,
            1,
            target,
        )?))
    }

    /// Build file path inside a package folder
    pub fn build_file(package_dir: &Path) -> PathBuf {
        package_dir.join(BUILD_GRADLE)
    }

    /// Patch every matching package in `cache`.
    ///
    /// An unreadable cache is logged and yields an empty run.
    pub fn run(&self, cache: &PubCache) -> Result<GradleFixRun> {
        let packages = match cache.find_packages(&self.packages) {
            Ok(packages) => packages,
            Err(e) => {
                tracing::error!(error = %e, "Error reading pub cache directory");
                return Ok(GradleFixRun::default());
            }
        };

        let patch = self.file_patch()?;
        let mut report = PatchReport::new();
        for package in &packages {
            let file = Self::build_file(&package.path);
            let outcome = patch.apply(&file);
            report.record(file, outcome);
        }

        Ok(GradleFixRun { packages, report })
    }
}

impl Default for GradleFix {
    fn default() -> Self {
        Self::from_config(&AndroidConfig::default())
    }
}
