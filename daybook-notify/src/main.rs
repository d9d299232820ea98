mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use daybook_core::config::DaybookConfig;
use daybook_notify::Notifier;
use daybook_notify::notifier::{DesktopNotifier, LogNotifier};

#[derive(Parser)]
#[command(name = "daybook-notify")]
#[command(about = "Desktop reminders for your daybook events")]
struct Cli {
    /// Events file (defaults to events_file in ~/.config/daybook/config.toml)
    #[arg(long, global = true)]
    events: Option<PathBuf>,

    /// Seconds between reminder checks
    #[arg(long, global = true)]
    interval: Option<u64>,

    /// Log reminders instead of showing desktop notifications
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the events file and show reminders until interrupted (default)
    Run,
    /// Check once for due reminders and exit
    Check,
    /// List today's events that have a reminder
    Upcoming,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = DaybookConfig::load()?;
    if let Some(events) = cli.events {
        config.events_file = events;
    }
    if let Some(interval) = cli.interval {
        config.scan_interval_secs = interval;
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::run(&config, notifier(cli.dry_run)).await,
        Commands::Check => commands::check::run(&config, notifier(cli.dry_run)).await,
        Commands::Upcoming => commands::upcoming::run(&config),
    }
}

fn notifier(dry_run: bool) -> Box<dyn Notifier> {
    if dry_run {
        Box::new(LogNotifier)
    } else {
        Box::new(DesktopNotifier::default())
    }
}
