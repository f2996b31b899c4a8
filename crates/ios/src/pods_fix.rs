//! SDWebImage HDR workarounds
//!
//! SDWebImage decodes HDR images through APIs that misbehave on some Xcode/iOS
//! combinations. Two files under `ios/Pods/SDWebImage` are patched:
//!
//! - `UIImage+Metadata.m`: `isHighDynamicRange` always answers `NO`
//! - `SDImageIOAnimatedCoder.m`: the HDR/SDR decode-request options are commented out

use findeasy_core::error::Result;
use findeasy_core::patch::{FilePatch, PatchReport, RegexRule};
use std::path::{Path, PathBuf};

/// Directory of the SDWebImage core sources relative to the project root
pub const SDWEBIMAGE_CORE: &str = "ios/Pods/SDWebImage/SDWebImage/Core";

pub const UIIMAGE_METADATA: &str = "UIImage+Metadata.m";
pub const ANIMATED_CODER: &str = "SDImageIOAnimatedCoder.m";

const HDR_RETURN_PATTERN: &str = r"return\s+(self\.isHighDynamicRange|\[self\s+isHighDynamicRange\]);?";

// Line-anchored so an already commented line never matches again.
// `kCGImage\s*SourceDecode` also covers the stray-space spelling.
const DECODE_REQUEST_PATTERN: &str = r"(?m)^([ \t]*)(decodingOptions\[\(__bridge NSString \*\)kCGImageSourceDecodeRequest\]\s*=\s*\(__bridge NSString \*\)kCGImage\s*SourceDecodeTo(?:HDR|SDR);)";

/// Patches for the SDWebImage pod
#[derive(Debug, Clone)]
pub struct PodsFix {
    project_root: PathBuf,
    backup: bool,
    dry_run: bool,
}

impl PodsFix {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            backup: true,
            dry_run: false,
        }
    }

    pub fn backup(mut self, enabled: bool) -> Self {
        self.backup = enabled;
        self
    }

    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    fn core_dir(&self) -> PathBuf {
        self.project_root.join(SDWEBIMAGE_CORE)
    }

    pub fn metadata_file(&self) -> PathBuf {
        self.core_dir().join(UIIMAGE_METADATA)
    }

    pub fn animated_coder_file(&self) -> PathBuf {
        self.core_dir().join(ANIMATED_CODER)
    }

    /// `return self.isHighDynamicRange;` becomes `return NO;`
    pub fn metadata_patch(&self) -> Result<FilePatch> {
        Ok(FilePatch::new(UIIMAGE_METADATA)
            .backup(self.backup)
            .dry_run(self.dry_run)
            .with_rule(RegexRule::new(
                "hdr-return-no",
                HDR_RETURN_PATTERN,
                "return NO;",
            )?))
    }

    /// HDR/SDR decode-request assignments get commented out
    pub fn animated_coder_patch(&self) -> Result<FilePatch> {
        Ok(FilePatch::new(ANIMATED_CODER)
            .backup(self.backup)
            .dry_run(self.dry_run)
            .with_rule(RegexRule::new(
                "comment-decode-request",
                DECODE_REQUEST_PATTERN,
                "$1// $2",
            )?))
    }

    pub fn fix_metadata(&self) -> Result<PatchReport> {
        Ok(apply_one(&self.metadata_patch()?, &self.metadata_file()))
    }

    pub fn fix_animated_coder(&self) -> Result<PatchReport> {
        Ok(apply_one(
            &self.animated_coder_patch()?,
            &self.animated_coder_file(),
        ))
    }
}

fn apply_one(patch: &FilePatch, path: &Path) -> PatchReport {
    let mut report = PatchReport::new();
    report.record(path, patch.apply(path));
    report
}
