//! Content Publisher CLI
//!
//! Uploads a title's content files to the remote admin API

use anyhow::Result;
use clap::{Parser, Subcommand};
use content_publisher::core::paths::{ContentPaths, DEFAULT_DATA_DIR};
use content_publisher::core::run_context::{DEFAULT_LOG_FILE, RunContext};
use content_publisher::core::settings::load_title_settings;
use content_publisher::{ContentChecker, ContentPublisher, HttpAdminApi};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

/// Game content upload assistant
#[derive(Parser)]
#[command(name = "content-publisher")]
#[command(version = "0.1.0")]
#[command(about = "Game content upload assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload all content files to the configured title
    Publish {
        /// Content directory (defaults to ./PlayFabData)
        #[arg(value_name = "DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Settings file (defaults to TitleSettings.json in the data dir)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Log file (overwritten on every run)
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Validate the content files without uploading anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate content files locally
    Check {
        /// Content directory (defaults to ./PlayFabData)
        #[arg(value_name = "DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let result = run().await;

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("\n❌ Error");
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Publish {
            data_dir,
            settings,
            log_file,
            dry_run,
        } => {
            let paths = ContentPaths::new(data_dir.unwrap_or_else(|| DEFAULT_DATA_DIR.into()));
            if dry_run {
                return Ok(check_command(paths));
            }
            publish_command(paths, settings, log_file).await
        }
        Commands::Check { data_dir } => {
            let paths = ContentPaths::new(data_dir.unwrap_or_else(|| DEFAULT_DATA_DIR.into()));
            Ok(check_command(paths))
        }
    }
}

async fn publish_command(
    paths: ContentPaths,
    settings_path: Option<PathBuf>,
    log_file: Option<PathBuf>,
) -> Result<i32> {
    println!("\n📦 content-publisher\n");

    let log_path = log_file.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let mut ctx = RunContext::new(&log_path);

    let settings_path = settings_path.unwrap_or_else(|| paths.title_settings());
    let settings = match load_title_settings(&settings_path).await {
        Ok(settings) => settings,
        Err(error) => {
            ctx.local_failure(format!("[{}] {}", error.code(), error));
            ctx.finish().await?;
            return Ok(1);
        }
    };

    ctx.info(format!("Setting destination TitleId to: {}", settings.title_id));
    ctx.info(format!("Using secret key: {}", settings.masked_secret()));
    ctx.info(format!("Default catalog: {}", settings.catalog_name));

    let api = Arc::new(HttpAdminApi::new(&settings));
    let publisher = ContentPublisher::new(api, paths, settings.catalog_name.clone());

    if let Err(error) = publisher.run(&mut ctx).await {
        ctx.local_failure(format!("[{}] {}", error.code(), error));
    }

    let success = ctx.finish().await?;
    Ok(if success { 0 } else { 1 })
}

fn check_command(paths: ContentPaths) -> i32 {
    println!("\n🔍 Checking content files in {}\n", paths.data_dir().display());

    let report = ContentChecker::new(paths).check();
    if report.is_ok() {
        println!("✅ All content files look good.");
        return 0;
    }

    for issue in &report.issues {
        println!("❌ {}", issue);
    }
    println!("\n{} issue(s) found.", report.issues.len());
    1
}
