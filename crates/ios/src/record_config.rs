//! `record_darwin` audio session fix
//!
//! Replaces the `#if os(iOS)` block of `RecordConfig.swift` with an
//! `IosConfig` that parses `categoryOptions` leniently and guards
//! `overrideMutedMicrophoneInterruption` behind an availability check.

use findeasy_core::error::Result;
use findeasy_core::patch::{BalancedBlockRule, FilePatch, PatchReport};
use findeasy_core::pub_cache::PubCache;
use std::path::{Path, PathBuf};

/// Location of the file inside a `record_darwin` package
pub const RECORD_CONFIG: &str = "ios/Classes/RecordConfig.swift";

pub const IOS_BLOCK_START: &str = "#if os(iOS)";

/// Canonical replacement for the iOS block
pub const IOS_CONFIG_BLOCK: &str = r#"#if os(iOS)
struct IosConfig {
  let categoryOptions: [AVAudioSession.CategoryOptions]
  let manageAudioSession: Bool
  init(map: [String: Any]) {
    let comps = map["categoryOptions"] as? String
    let options: [AVAudioSession.CategoryOptions]? = comps?.split(separator: ",").compactMap { part in
        let trimmed = part.trimmingCharacters(in: .whitespaces)
        switch trimmed {
        case "mixWithOthers":
            return .mixWithOthers
        case "duckOthers":
            return .duckOthers
        case "allowBluetooth":
            return .allowBluetooth
        case "defaultToSpeaker":
            return .defaultToSpeaker
        case "interruptSpokenAudioAndMixWithOthers":
            return .interruptSpokenAudioAndMixWithOthers
        case "allowBluetoothA2DP":
            return .allowBluetoothA2DP
        case "allowAirPlay":
            return .allowAirPlay
        case "overrideMutedMicrophoneInterruption":
            if #available(iOS 14.5, *) {
                return .overrideMutedMicrophoneInterruption
            } else {
                return nil
            }
        default:
            return nil
        }
    }
    self.categoryOptions = options ?? []
    self.manageAudioSession = map["manageAudioSession"] as? Bool ?? true
  }
}
#else
struct IosConfig {
  init(map: [String: Any]) {}
}
#endif"#;

/// RecordConfig.swift fixer
#[derive(Debug, Clone)]
pub struct RecordConfigFix {
    package: String,
    backup: bool,
    dry_run: bool,
}

impl RecordConfigFix {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
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

    pub fn file_patch(&self) -> FilePatch {
        FilePatch::new("RecordConfig.swift")
            .backup(self.backup)
            .dry_run(self.dry_run)
            .with_rule(BalancedBlockRule::conditional(
                "ios-config-block",
                IOS_BLOCK_START,
                IOS_CONFIG_BLOCK,
            ))
    }

    /// First installed copy of RecordConfig.swift, in folder-name order
    pub fn locate(&self, cache: &PubCache) -> Result<Option<PathBuf>> {
        cache.find_package_file(&self.package, Path::new(RECORD_CONFIG))
    }

    /// Patch the first copy found in `cache`.
    ///
    /// A missing or unreadable cache, or no installed copy, yields an empty report.
    pub fn run(&self, cache: &PubCache) -> PatchReport {
        let mut report = PatchReport::new();

        let file = match self.locate(cache) {
            Ok(Some(file)) => file,
            Ok(None) => {
                tracing::info!(package = %self.package, "RecordConfig.swift not found in pub cache");
                return report;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error reading pub cache directory");
                return report;
            }
        };

        let outcome = self.file_patch().apply(&file);
        report.record(file, outcome);
        report
    }
}

impl Default for RecordConfigFix {
    fn default() -> Self {
        Self::new("record_darwin")
    }
}
