//! findeasy iOS CLI
//!
//! Maintenance tools for the findeasy iOS build.

use anyhow::Result;
use clap::{Parser, Subcommand};
use findeasy_cli::output::{format_duration, print_outcome, summary_line, Status};
use findeasy_core::config::Config;
use findeasy_core::error::exit_codes;
use findeasy_core::patch::PatchReport;
use findeasy_core::pub_cache::PubCache;
use findeasy_ios::pods_fix::PodsFix;
use findeasy_ios::record_config::RecordConfigFix;
use findeasy_telemetry::{TelemetryConfig, Timer};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "findeasy-ios")]
#[command(about = "Maintenance tools for the findeasy iOS build")]
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
    /// Patch SDWebImage pods and record_darwin for the current toolchain
    Fix {
        /// Pub cache root (defaults to PUB_CACHE or the platform location)
        #[arg(long)]
        pub_cache: Option<PathBuf>,
        /// Flutter project root containing ios/Pods
        #[arg(long)]
        project_root: Option<PathBuf>,
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
        /// Skip `.bak` backups
        #[arg(long)]
        no_backup: bool,
    },
}

struct FixArgs {
    pub_cache: Option<PathBuf>,
    project_root: Option<PathBuf>,
    dry_run: bool,
    backup: bool,
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
        Commands::Fix {
            pub_cache,
            project_root,
            dry_run,
            no_backup,
        } => run_fix(
            FixArgs {
                pub_cache,
                project_root,
                dry_run,
                backup: !no_backup,
            },
            &config,
        ),
    };

    std::process::exit(exit_code);
}

fn run_fix(args: FixArgs, config: &Config) -> i32 {
    let project_root = args
        .project_root
        .unwrap_or_else(|| config.schema.paths.project_root.clone());
    let backup = args.backup && config.schema.ios.backup;
    let dry_run = args.dry_run;

    Status::header("iOS dependency fix");
    Status::info(&format!("Project root: {}", project_root.display()));

    let timer = Timer::start("fix-ios");
    let pods = PodsFix::new(&project_root).backup(backup).dry_run(dry_run);
    let mut report = PatchReport::new();

    Status::step(1, 3, "UIImage+Metadata.m");
    match pods.fix_metadata() {
        Ok(step) => report.extend(step),
        Err(e) => {
            Status::error(&format!("Fix failed: {}", e));
            return exit_codes::FAILURE;
        }
    }

    Status::step(2, 3, "SDImageIOAnimatedCoder.m");
    match pods.fix_animated_coder() {
        Ok(step) => report.extend(step),
        Err(e) => {
            Status::error(&format!("Fix failed: {}", e));
            return exit_codes::FAILURE;
        }
    }

    Status::step(3, 3, "RecordConfig.swift");
    match args.pub_cache.or_else(|| config.pub_cache_root()) {
        Some(root) => {
            let record = RecordConfigFix::new(&config.schema.ios.record_package)
                .backup(backup)
                .dry_run(dry_run);
            let step = record.run(&PubCache::new(&root));
            if step.is_empty() {
                Status::warning(&format!(
                    "{} not found in {}",
                    config.schema.ios.record_package,
                    root.display()
                ));
            }
            report.extend(step);
        }
        None => Status::warning("Could not determine the pub cache location; skipping"),
    }

    println!();
    for entry in &report.entries {
        print_outcome(&entry.path, &entry.outcome, dry_run);
    }

    let elapsed = timer.stop();
    println!();
    Status::success(&format!(
        "Completed! {} in {}",
        summary_line(&report, dry_run),
        format_duration(elapsed)
    ));

    exit_codes::SUCCESS
}
