//! Idempotent in-place file patching
//!
//! A [`FilePatch`] is a named list of [`PatchRule`]s applied in order to the
//! full text of one file:
//!
//! - the file is written back only when the text actually changed
//! - an optional one-time `.bak` copy is taken before the first patch
//! - errors are caught per file, logged, and reported as [`PatchOutcome::Failed`]
//!
//! # Example
//!
//! ```rust,no_run
//! use findeasy_core::patch::{FilePatch, RegexRule};
//! use std::path::Path;
//!
//! let patch = FilePatch::new("build.gradle")
//!     .with_rule(RegexRule::literal("java", "VERSION_11", "VERSION_1_8").unwrap());
//! let outcome = patch.apply(Path::new("android/build.gradle"));
//! println!("{}", outcome);
//! ```

mod backup;
mod block;
mod rules;

pub use backup::{backup_path, create_backup, BackupStatus};
pub use block::{find_balanced_block, normalize_whitespace, BalancedBlockRule, BlockSpan};
pub use rules::{CaptureRule, RegexRule};

use crate::error::Result;
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A text transformation scoped to one file.
///
/// Implementations must be idempotent: applying a rule to its own output
/// returns the input unchanged. `Cow::Borrowed` signals "no change".
pub trait PatchRule {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Transform the full file text
    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str>;
}

/// Per-file result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    Modified,
    Unchanged,
    NotFound,
    Failed(String),
}

impl PatchOutcome {
    pub fn is_modified(&self) -> bool {
        matches!(self, Self::Modified)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Modified => "modified",
            Self::Unchanged => "unchanged",
            Self::NotFound => "not found",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "failed: {}", reason),
            other => f.write_str(other.label()),
        }
    }
}

/// Rules for one file plus how to apply them
pub struct FilePatch {
    name: String,
    rules: Vec<Box<dyn PatchRule>>,
    backup: bool,
    dry_run: bool,
}

impl FilePatch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            backup: false,
            dry_run: false,
        }
    }

    /// Append a rule; rules run in insertion order
    pub fn with_rule(mut self, rule: impl PatchRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Take a one-time `.bak` copy before patching
    pub fn backup(mut self, enabled: bool) -> Self {
        self.backup = enabled;
        self
    }

    /// Report what would change without touching the disk
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run every rule over `content`
    pub fn patch_text<'a>(&self, content: &'a str) -> Cow<'a, str> {
        let mut text = Cow::Borrowed(content);
        for rule in &self.rules {
            let next = match rule.apply(&text) {
                Cow::Owned(changed) => Some(changed),
                Cow::Borrowed(_) => None,
            };
            if let Some(changed) = next {
                tracing::debug!(file = %self.name, rule = rule.name(), "Rule matched");
                text = Cow::Owned(changed);
            }
        }
        text
    }

    /// Patch `path`, propagating I/O errors
    pub fn try_apply(&self, path: &Path) -> Result<PatchOutcome> {
        if !path.is_file() {
            return Ok(PatchOutcome::NotFound);
        }

        if self.backup && !self.dry_run {
            create_backup(path)?;
        }

        let content = fs::read_to_string(path)?;
        let patched = self.patch_text(&content);
        if patched == content.as_str() {
            return Ok(PatchOutcome::Unchanged);
        }

        if !self.dry_run {
            fs::write(path, patched.as_bytes())?;
        }
        Ok(PatchOutcome::Modified)
    }

    /// Patch `path`; any error becomes [`PatchOutcome::Failed`]
    pub fn apply(&self, path: &Path) -> PatchOutcome {
        let outcome = match self.try_apply(path) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Patch failed");
                PatchOutcome::Failed(e.message)
            }
        };

        tracing::info!(
            file = %path.display(),
            outcome = outcome.label(),
            dry_run = self.dry_run,
            "{}",
            self.name
        );
        outcome
    }
}

impl fmt::Debug for FilePatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePatch")
            .field("name", &self.name)
            .field("rules", &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>())
            .field("backup", &self.backup)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

/// One file and what happened to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchEntry {
    pub path: PathBuf,
    pub outcome: PatchOutcome,
}

/// Outcomes of a batch, in processing order
#[derive(Debug, Clone, Default)]
pub struct PatchReport {
    pub entries: Vec<PatchEntry>,
}

impl PatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: impl Into<PathBuf>, outcome: PatchOutcome) {
        self.entries.push(PatchEntry {
            path: path.into(),
            outcome,
        });
    }

    pub fn extend(&mut self, other: PatchReport) {
        self.entries.extend(other.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn modified_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_modified()).count()
    }

    pub fn unchanged_count(&self) -> usize {
        self.count(|o| matches!(o, PatchOutcome::Unchanged))
    }

    pub fn not_found_count(&self) -> usize {
        self.count(|o| matches!(o, PatchOutcome::NotFound))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, PatchOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&PatchOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }
}
