//! Logging setup for the findeasy tools
//!
//! - Structured logging with tracing
//! - Verbosity flags mapped onto an `EnvFilter` (`RUST_LOG` wins when set)
//! - Timing of whole runs

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize with custom configuration
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .with_target(config.show_target)
            .with_file(config.show_file)
            .with_line_number(config.show_line_number)
            .compact());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Logging initialized");

    Ok(())
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub show_target: bool,
    pub show_file: bool,
    pub show_line_number: bool,
    /// Color log lines; off for `--no-color`
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            show_target: false,
            show_file: false,
            show_line_number: false,
            ansi: true,
        }
    }
}

impl TelemetryConfig {
    /// Map `-q` / `-v` / `-vv` / `-vvv` onto a log level
    pub fn for_verbosity(verbose: u8, quiet: bool) -> Self {
        let log_level = if quiet {
            "error"
        } else {
            match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };

        Self {
            log_level: log_level.to_string(),
            show_target: verbose >= 2,
            ..Self::default()
        }
    }

    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.ansi = enabled;
        self
    }
}

/// Timer for measuring operation duration
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    /// Stop the timer and log the duration
    pub fn stop(self) -> Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.name,
            duration_ms = duration.as_millis() as u64,
            "Timer completed"
        );
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(TelemetryConfig::for_verbosity(0, false).log_level, "warn");
        assert_eq!(TelemetryConfig::for_verbosity(1, false).log_level, "info");
        assert_eq!(TelemetryConfig::for_verbosity(2, false).log_level, "debug");
        assert_eq!(TelemetryConfig::for_verbosity(5, false).log_level, "trace");
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        assert_eq!(TelemetryConfig::for_verbosity(3, true).log_level, "error");
    }

    #[test]
    fn test_ansi_follows_color_flag() {
        assert!(TelemetryConfig::for_verbosity(1, false).ansi);

        let plain = TelemetryConfig::for_verbosity(2, false).with_ansi(false);
        assert!(!plain.ansi);
        assert_eq!(plain.log_level, "debug");
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start("test_operation");
        std::thread::sleep(std::time::Duration::from_millis(10));
        let duration = timer.stop();
        assert!(duration.as_millis() >= 10);
    }
}
