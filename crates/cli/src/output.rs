//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use findeasy_core::patch::{PatchOutcome, PatchReport};
use owo_colors::OwoColorize;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Status message helpers
pub struct Status;

impl Status {
    /// Suppress everything except warnings and errors
    pub fn set_quiet(quiet: bool) {
        QUIET.store(quiet, Ordering::Relaxed);
    }

    fn quiet() -> bool {
        QUIET.load(Ordering::Relaxed)
    }

    /// Print a success message
    pub fn success(message: &str) {
        if !Self::quiet() {
            println!("{} {}", "✓".green(), message);
        }
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        if !Self::quiet() {
            println!("{} {}", "ℹ".blue(), message);
        }
    }

    /// Print a step message (for multi-step operations)
    pub fn step(step: usize, total: usize, message: &str) {
        if !Self::quiet() {
            println!("{} {}", format!("[{}/{}]", step, total).dimmed(), message);
        }
    }

    /// Print a header
    pub fn header(message: &str) {
        if !Self::quiet() {
            println!();
            println!("{}", message.bold());
            println!("{}", "─".repeat(message.chars().count()));
        }
    }
}

/// Print the outcome for one patched file
pub fn print_outcome(path: &Path, outcome: &PatchOutcome, dry_run: bool) {
    let path = path.display();
    match outcome {
        PatchOutcome::Modified if dry_run => Status::info(&format!("Would modify: {}", path)),
        PatchOutcome::Modified => Status::success(&format!("Modified: {}", path)),
        PatchOutcome::Unchanged => Status::info(&format!("No changes needed: {}", path)),
        PatchOutcome::NotFound => Status::info(&format!("File not found: {}", path)),
        PatchOutcome::Failed(reason) => Status::warning(&format!("Failed: {} ({})", path, reason)),
    }
}

/// One-line summary of a batch
pub fn summary_line(report: &PatchReport, dry_run: bool) -> String {
    let verb = if dry_run { "Would modify" } else { "Modified" };
    let mut line = format!(
        "{} {}",
        verb,
        format_count(report.modified_count(), "file", "files")
    );

    let mut extras = Vec::new();
    if report.unchanged_count() > 0 {
        extras.push(format!("{} unchanged", report.unchanged_count()));
    }
    if report.not_found_count() > 0 {
        extras.push(format!("{} not found", report.not_found_count()));
    }
    if report.failed_count() > 0 {
        extras.push(format!("{} failed", report.failed_count()));
    }
    if !extras.is_empty() {
        line.push_str(&format!(" ({})", extras.join(", ")));
    }
    line
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
