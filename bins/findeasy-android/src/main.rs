//! findeasy Android CLI
//!
//! Maintenance tools for the findeasy Android build.

use anyhow::Result;
use clap::{Parser, Subcommand};
use findeasy_android::gradle_fix::GradleFix;
use findeasy_cli::output::{format_count, format_duration, print_outcome, summary_line, Status};
use findeasy_core::config::Config;
use findeasy_core::error::exit_codes;
use findeasy_core::pub_cache::PubCache;
use findeasy_telemetry::{TelemetryConfig, Timer};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "findeasy-android")]
#[command(about = "Maintenance tools for the findeasy Android build")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pin hosted plugin build.gradle files to one Java version
    #[command(name = "fix-gradle")]
    FixGradle {
        /// Pub cache root (defaults to PUB_CACHE or the platform location)
        #[arg(long)]
        pub_cache: Option<PathBuf>,
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }
    Status::set_quiet(cli.quiet);
    findeasy_telemetry::init_with_config(
        TelemetryConfig::for_verbosity(cli.verbose, cli.quiet).with_ansi(!cli.no_color),
    )?;

    let config = Config::load(cli.config.as_deref())?;

    let exit_code = match cli.command {
        Commands::FixGradle { pub_cache, dry_run } => run_fix_gradle(pub_cache, dry_run, &config),
    };

    std::process::exit(exit_code);
}

fn run_fix_gradle(pub_cache: Option<PathBuf>, dry_run: bool, config: &Config) -> i32 {
    let Some(root) = pub_cache.or_else(|| config.pub_cache_root()) else {
        Status::error("Could not determine the pub cache location; pass --pub-cache");
        return exit_codes::FAILURE;
    };

    let cache = PubCache::new(&root);
    let fix = GradleFix::from_config(&config.schema.android).dry_run(dry_run);

    Status::header("Android Java version fix");
    Status::info(&format!("Target: {}", fix.target()));
    Status::info(&format!("Searching for packages: {}", fix.packages().join(", ")));
    Status::info(&format!("Searching in: {}", cache.hosted_dir().display()));

    let timer = Timer::start("fix-gradle");
    let run = match fix.run(&cache) {
        Ok(run) => run,
        Err(e) => {
            Status::error(&format!("Fix failed: {}", e));
            return exit_codes::FAILURE;
        }
    };

    if run.packages.is_empty() {
        Status::info(&format!(
            "No target packages found ({}).",
            fix.packages().join(", ")
        ));
        return exit_codes::SUCCESS;
    }

    Status::info(&format!(
        "Found {}:",
        format_count(run.packages.len(), "target package", "target packages")
    ));
    for (i, package) in run.packages.iter().enumerate() {
        Status::step(i + 1, run.packages.len(), &package.name);
    }

    println!();
    for entry in &run.report.entries {
        print_outcome(&entry.path, &entry.outcome, dry_run);
    }

    let elapsed = timer.stop();
    println!();
    Status::success(&format!(
        "Completed! {} in {}",
        summary_line(&run.report, dry_run),
        format_duration(elapsed)
    ));

    exit_codes::SUCCESS
}
