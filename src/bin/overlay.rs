use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hud_overlay::app::{AppConfig, OverlayApp};
use hud_overlay::build_info::{self, BuildInfo};
use hud_overlay::health;

/// Mouse input arbitration for a game overlay
#[derive(Debug, Parser)]
#[command(version = build_info::PKG_VERSION, about)]
struct Cli {
    /// Configuration profile (defaults to OVERLAY_PROFILE, then "release")
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the startup self-test and exit with its status
    Check,
    /// Run a scripted session against the headless platform
    Demo,
    /// Print build metadata
    Version,
}

fn load_config(profile: Option<&str>) -> anyhow::Result<AppConfig> {
    let config = match profile {
        Some(profile) => AppConfig::load(profile),
        None => AppConfig::load_from_env(),
    };
    config.context("loading configuration")
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.profile.as_deref())?;
    init_tracing(&config);

    match cli.command.unwrap_or(Command::Demo) {
        Command::Check => {
            let report = health::run_all_checks();
            health::print_report(&report);
            std::process::exit(report.exit_code());
        }
        Command::Demo => {
            info!(version = %build_info::version_string(), "Overlay starting");
            let mut app = OverlayApp::new(config);
            let summary = app.run_demo();
            if summary.dispatched == 0 {
                warn!("No mouse events were dispatched");
            }
            println!(
                "{} frames, {} hook events consumed, {} passed through, {} dispatched",
                summary.frames, summary.consumed, summary.passed_through, summary.dispatched
            );
        }
        Command::Version => println!("{}", BuildInfo::current()),
    }

    Ok(())
}
